pub mod access;
pub mod badges;
pub mod matching;
pub mod scoring;
