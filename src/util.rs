//! Shared utility modules used across Sift components.

pub mod levenshtein;
