pub mod counter;
pub mod generator;
pub mod runner;
pub mod statistics;
pub mod wordlist;
