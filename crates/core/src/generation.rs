//! Prompt composition and sampler defaults for text-to-image requests.
//!
//! The remote model is tuned for full-length studio portraits, so every
//! caller prompt is wrapped with a fixed attention weight and followed by a
//! fixed style suffix. The negative prompt sent upstream is always the fixed
//! quality and content filter list below; callers cannot extend it.

// ---------------------------------------------------------------------------
// Prompt composition
// ---------------------------------------------------------------------------

/// Attention weight applied to the caller's prompt.
pub const PROMPT_WEIGHT: &str = "1.4";

/// Style suffix appended after the weighted caller prompt.
pub const STYLE_SUFFIX: &str = " ,(full-length portrait: 1.5), (8k, RAW photo, best quality, \
masterpiece:1.2), (realistic, photo-realistic:1.37), (male:1.3), studio light, white backgrouond, smile";

/// Negative prompt sent with every request.
pub const DEFAULT_NEGATIVE_PROMPT: &str = "EasyNegative, paintings, sketches, (worst quality:2), \
(low quality:2), (normal quality:2), lowres, normal quality, ((monochrome)), ((grayscale)), \
skin spots, acnes, skin blemishes, age spot, ,extra fingers,fewer fingers, strange fingers, \
bad hand, fat ass, hole, naked, fat thigh,6 fingers, underwear, nsfw, nude,leg open, fat";

// ---------------------------------------------------------------------------
// Sampler defaults
// ---------------------------------------------------------------------------

pub const SAMPLER: &str = "DPM++ SDE";
pub const SCHEDULER: &str = "Automatic";
pub const CFG_SCALE: u32 = 7;

/// Default number of denoising steps.
pub const DEFAULT_STEPS: u32 = 20;
/// Default width for direct client calls.
pub const DEFAULT_WIDTH: u32 = 512;
/// Default height for direct client calls (portrait orientation).
pub const DEFAULT_HEIGHT: u32 = 1024;

/// Wrap the caller's prompt with the fixed weight and style suffix.
///
/// `"red dress"` becomes `"(red dress: 1.4) ,(full-length portrait: 1.5), ..."`.
/// The prompt is inserted verbatim.
pub fn compose_prompt(prompt: &str) -> String {
    format!("({prompt}: {PROMPT_WEIGHT}){STYLE_SUFFIX}")
}
