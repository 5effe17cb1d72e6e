//! Roast generation: prompt building, fallback templates, and the
//! retry/fallback pipeline.

mod fallback;
mod pipeline;
mod prompt;

pub use fallback::{FALLBACK_MODEL, fallback_roast};
pub use pipeline::{PipelineConfig, RoastPipeline};
pub use prompt::{SYSTEM_PROMPT, build_prompt};
