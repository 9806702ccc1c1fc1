//! Parallel word-frequency counting for large text files
//!
//! The input is cut into chunks, a fixed pool of workers counts tokens in them, the workers'
//! counts are merged once they've all finished, and a bounded heap picks the most frequent
//! tokens. The `wt-top-words` binary is a thin layer over `top_words_in_file`.


#[macro_use] extern crate log;
extern crate crossbeam_channel;
extern crate farmhash;
extern crate num_cpus;
extern crate rayon;
extern crate regex;
extern crate unicode_segmentation;
#[cfg(test)] extern crate rand;

pub mod errors;
pub mod farm;
pub mod tokenize;
pub mod chunk;
pub mod config;
pub mod pool;
pub mod merge;
pub mod topk;
pub mod report;
pub mod pipeline;

/// A normalized word
pub type Token = String;
pub type Count = u64;
/// How many times each token was seen
pub type FrequencyMap = farm::FarmMap<Token, Count>;

pub use pipeline::{count_words, top_words, top_words_in_file};
pub use topk::{select_top_k, RankedEntry};
