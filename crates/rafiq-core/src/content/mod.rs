pub mod quran;

pub use quran::{Ayah, QuranClient, Surah};
