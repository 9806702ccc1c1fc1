//! Combine the workers' counts
use farm::new_farm;
use super::FrequencyMap;

/// Sum any number of frequency maps into one.
///
/// The order of the maps doesn't matter. The first map is reused as the accumulator, so the
/// result only allocates for words the first map never saw.
pub fn merge<I>(maps: I) -> FrequencyMap
    where I: IntoIterator<Item = FrequencyMap> {
    let mut maps = maps.into_iter();
    let mut global = maps.next().unwrap_or_else(new_farm);
    for partial in maps {
        merge_into(&mut global, partial);
    }
    global
}

/// Add every count in `partial` to `global`
pub fn merge_into(global: &mut FrequencyMap, partial: FrequencyMap) {
    global.reserve(partial.len().saturating_sub(global.len()));
    for (token, count) in partial {
        *global.entry(token).or_insert(0) += count;
    }
}
