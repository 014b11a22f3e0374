pub mod compose;
pub mod note;
pub mod render;
pub mod resolve;
pub mod score;
pub mod synth;
pub mod tuning;
pub mod wave;
