//! The whole run: chunk the input, count in parallel, merge, and pick the top words
use std::fs::File;
use std::io::Read;
use std::path::Path;
use chunk::ChunkReader;
use config::Config;
use errors::*;
use merge::merge;
use pool;
use topk::{select_top_k, RankedEntry};
use super::FrequencyMap;

/// Count every token in `input`.
///
/// The counts don't depend on the number of workers or, in `Lines` mode, on the chunk size.
pub fn count_words<R: Read>(input: R, config: &Config) -> Result<FrequencyMap> {
    config.validate()?;
    let tokenizer = config.tokenizer()?;
    let chunks = ChunkReader::new(input, config.chunk_size, config.mode);
    let partials = pool::count_chunks(chunks, config, |chunk, counts| {
        tokenizer.count_bytes_into(&chunk.data, counts)
    })?;
    let global = merge(partials);
    info!("Found {} distinct tokens", global.len());
    Ok(global)
}

/// The `k` most frequent tokens in `input`
pub fn top_words<R: Read>(input: R, config: &Config, k: usize) -> Result<Vec<RankedEntry>> {
    let global = count_words(input, config)?;
    Ok(select_top_k(&global, k))
}

/// The `k` most frequent tokens in the file at `path`
pub fn top_words_in_file<P: AsRef<Path>>(path: P, config: &Config, k: usize)
    -> Result<Vec<RankedEntry>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| Error::Input(path.to_path_buf(), err))?;
    info!("Counting words in {} with {} workers, {} byte chunks ({:?} mode), {} queued at most",
        path.display(), config.workers, config.chunk_size, config.mode, config.queue_depth);
    top_words(file, config, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenize::Boundary;

    fn small(workers: usize, chunk_size: usize) -> Config {
        Config {
            workers: workers,
            queue_depth: 2,
            chunk_size: chunk_size,
            ..Config::default()
        }
    }

    #[test]
    fn cat_sat_on_the_mat() {
        let input = "the cat sat on the mat the cat ran";
        let top = top_words(input.as_bytes(), &small(2, 8), 2).unwrap();
        assert_eq!(top, vec![
            RankedEntry { token: "the".to_string(), count: 3 },
            RankedEntry { token: "cat".to_string(), count: 2 },
        ]);
    }

    #[test]
    fn empty_input_has_no_words() {
        assert!(top_words(&b""[..], &small(3, 8), 10).unwrap().is_empty());
    }

    #[test]
    fn tokenizer_settings_are_used() {
        let config = Config { boundary: Boundary::Words, ..small(2, 4) };
        let counts = count_words("Hi, hi! HI?\nbye.".as_bytes(), &config).unwrap();
        assert_eq!(counts["hi"], 3);
        assert_eq!(counts["bye"], 1);
    }

    #[test]
    fn bad_patterns_fail_before_reading() {
        let config = Config { boundary: Boundary::Pattern("(".to_string()), ..small(1, 4) };
        match count_words("a b".as_bytes(), &config) {
            Err(Error::InvalidPattern(_)) => {}
            other => panic!("expected a pattern error, got {:?}", other.map(|m| m.len())),
        }
    }

    #[test]
    fn missing_files_are_input_errors() {
        match top_words_in_file("/this/file/does/not/exist.txt", &small(1, 4), 3) {
            Err(Error::Input(path, _)) => assert!(path.ends_with("exist.txt")),
            other => panic!("expected an input error, got {:?}", other),
        }
    }
}
