//! Item height sources.

use std::fmt;
use std::rc::Rc;

use super::types::MIN_ITEM_HEIGHT;

/// Where item heights come from when building a position index.
///
/// `Dynamic` must be deterministic for a given index during one build.
/// The engine never caches heights across height-source changes; every
/// `update_items` call rebuilds from scratch.
#[derive(Clone)]
pub enum HeightSource {
    /// Every item has the same height.
    Uniform(f64),
    /// Height is computed per index.
    Dynamic(Rc<dyn Fn(usize) -> f64>),
}

impl HeightSource {
    /// Wrap a closure as a dynamic height source.
    pub fn from_fn(f: impl Fn(usize) -> f64 + 'static) -> Self {
        Self::Dynamic(Rc::new(f))
    }

    /// Height source that cycles through a fixed list: `heights[i % len]`.
    ///
    /// An empty list yields uniform minimum-height items.
    pub fn from_heights(heights: Vec<f64>) -> Self {
        if heights.is_empty() {
            return Self::Uniform(MIN_ITEM_HEIGHT);
        }
        Self::Dynamic(Rc::new(move |index| heights[index % heights.len()]))
    }

    /// Raw (unclamped) height for `index`.
    pub fn height_of(&self, index: usize) -> f64 {
        match self {
            Self::Uniform(height) => *height,
            Self::Dynamic(f) => f(index),
        }
    }

    /// True for a constant height source.
    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Uniform(_))
    }
}

impl fmt::Debug for HeightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform(height) => f.debug_tuple("Uniform").field(height).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl Default for HeightSource {
    fn default() -> Self {
        Self::Uniform(MIN_ITEM_HEIGHT)
    }
}
