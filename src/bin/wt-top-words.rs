//! Find the most frequent words in a large text file
//!
//! The file is cut into chunks (at line ends unless `--mode bytes`), a pool of workers counts the
//! words in each chunk, and the counts are merged and ranked. Ties are broken alphabetically, so
//! the output is the same from run to run.
//!
//! Set RUST_LOG=info to watch the progress.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate wordtally;

use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use clap::Arg;

use wordtally::chunk::ChunkMode;
use wordtally::config::Config;
use wordtally::errors::*;
use wordtally::report;
use wordtally::tokenize::Boundary;

pub fn main() {
    env_logger::init();
    // Usage errors already exited inside clap; anything else lands here.
    if let Err(err) = inner_main() {
        debug!("{:?}", err);
        eprintln!("{}", err);
        process::exit(1);
    }
}

pub fn inner_main() -> Result<()> {
    let args = app_from_crate!()
        .args_from_usage(
            "--file <path> 'text file to count words in'
             --workers [count] 'how many counting workers to run (default: one per core)'
             --chunk-size [bytes] 'roughly how many bytes each worker gets at a time (default: 64 MiB)'
             --queue-depth [chunks] 'how many chunks may wait for a worker (default: one per worker)'
             --pattern [regex] 'count maximal matches of this regex instead of using --tokenizer'
             --fold-nukta 'fold decomposed Bengali nukta letters into single code points'
             --output [path] 'write the ranking to this file instead of standard output'")
        .arg(Arg::with_name("n")
            .short("n")
            .value_name("N")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value("10")
            .help("how many of the most frequent words to show"))
        .arg(Arg::with_name("mode")
            .long("mode")
            .takes_value(true)
            .possible_values(&["lines", "bytes"])
            .default_value("lines")
            .help("cut chunks only at line ends, or anywhere (which may split a word in two)"))
        .arg(Arg::with_name("tokenizer")
            .long("tokenizer")
            .takes_value(true)
            .possible_values(&["whitespace", "words", "bengali"])
            .default_value("whitespace")
            .help("what separates words"))
        .get_matches();

    let path = args.value_of("file").unwrap();
    let top_n = value_t!(args, "n", i64).unwrap_or_else(|e| e.exit());

    let mut config = Config::default();
    if args.is_present("workers") {
        config.workers = value_t!(args, "workers", usize).unwrap_or_else(|e| e.exit());
        // Follow the workers unless told otherwise
        config.queue_depth = config.workers;
    }
    if args.is_present("queue-depth") {
        config.queue_depth = value_t!(args, "queue-depth", usize).unwrap_or_else(|e| e.exit());
    }
    if args.is_present("chunk-size") {
        config.chunk_size = value_t!(args, "chunk-size", usize).unwrap_or_else(|e| e.exit());
    }
    config.mode = args.value_of("mode").unwrap_or("lines").parse::<ChunkMode>()?;
    config.boundary = match args.value_of("pattern") {
        Some(pattern) => Boundary::Pattern(pattern.to_string()),
        None => match args.value_of("tokenizer") {
            Some("words") => Boundary::Words,
            Some("bengali") => Boundary::bengali(),
            _ => Boundary::Whitespace,
        },
    };
    config.fold_nukta = args.is_present("fold-nukta");
    config.validate()?;
    info!("At most about {} MiB of chunks in memory at once", config.peak_chunk_bytes() >> 20);

    // Asking for a negative number of words isn't an error, it just gets none.
    let k = if top_n < 0 { 0 } else { top_n as usize };
    let ranking = wordtally::top_words_in_file(path, &config, k)?;

    match args.value_of("output") {
        Some(out_path) => {
            let mut out = BufWriter::new(File::create(out_path)?);
            report::write_report(&mut out, top_n, &ranking)?;
            info!("Wrote {} words to {}", ranking.len(), out_path);
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            report::write_report(&mut out, top_n, &ranking)?;
        }
    }
    Ok(())
}
