//! Morphogen concentration field.
//!
//! One `f32` layer per species, same shape as the lattice. Each
//! `diffuse_step` smooths, decays, applies queued deposits and clamps, so
//! values stay within `[0, max_concentration]` everywhere.

use gestation_data::Morphogen;
use serde::Serialize;

use crate::config::MorphogenConfig;

/// Largest blend factor a single smoothing pass may use.
const MAX_ALPHA: f64 = 0.8;

/// A request to add morphogen at a site on the next diffusion step.
#[derive(Debug, Clone, Copy)]
pub struct Deposit {
    pub site: usize,
    pub morphogen: Morphogen,
    pub amount: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MorphogenField {
    width: usize,
    height: usize,
    layers: [Vec<f32>; Morphogen::COUNT],
    #[serde(skip)]
    back_buffer: Vec<f32>,
    #[serde(skip)]
    pending: Vec<Deposit>,
    #[serde(skip)]
    diffusion: f64,
    #[serde(skip)]
    smoothing_passes: u32,
    #[serde(skip)]
    decay: f32,
    max_concentration: f32,
}

impl MorphogenField {
    #[must_use]
    pub fn new(width: usize, height: usize, diffusion: f64, config: &MorphogenConfig) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            layers: std::array::from_fn(|_| vec![0.0; size]),
            back_buffer: vec![0.0; size],
            pending: Vec::new(),
            diffusion,
            smoothing_passes: config.smoothing_passes,
            decay: config.decay,
            max_concentration: config.max_concentration,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn max_concentration(&self) -> f32 {
        self.max_concentration
    }

    #[must_use]
    pub fn layer(&self, morphogen: Morphogen) -> &[f32] {
        &self.layers[morphogen.index()]
    }

    #[inline]
    #[must_use]
    pub fn concentration(&self, morphogen: Morphogen, site: usize) -> f32 {
        self.layers[morphogen.index()][site]
    }

    /// Concentration at the site nearest to a continuous position.
    #[must_use]
    pub fn sample(&self, morphogen: Morphogen, x: f64, y: f64) -> f32 {
        let ix = (x.round().max(0.0) as usize).min(self.width.saturating_sub(1));
        let iy = (y.round().max(0.0) as usize).min(self.height.saturating_sub(1));
        self.concentration(morphogen, iy * self.width + ix)
    }

    /// Queues a deposit for the next diffusion step.
    pub fn inject(&mut self, site: usize, morphogen: Morphogen, amount: f32) {
        self.pending.push(Deposit {
            site,
            morphogen,
            amount,
        });
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of explicit passes and their blend factor for the configured coefficient.
    #[must_use]
    pub fn smoothing_schedule(&self) -> (usize, f32) {
        let strength = self.diffusion * f64::from(self.smoothing_passes);
        let passes = (strength / MAX_ALPHA).ceil().max(1.0) as usize;
        (passes, (strength / passes as f64) as f32)
    }

    /// Advances the field by one tick: smoothing, decay, injection, clamp.
    pub fn diffuse_step(&mut self) {
        let (passes, alpha) = self.smoothing_schedule();
        for layer in 0..Morphogen::COUNT {
            for _ in 0..passes {
                self.smooth(layer, alpha);
            }
            let decay = self.decay;
            for value in &mut self.layers[layer] {
                *value *= decay;
            }
        }

        for deposit in self.pending.drain(..) {
            self.layers[deposit.morphogen.index()][deposit.site] += deposit.amount;
        }

        let max = self.max_concentration;
        for layer in &mut self.layers {
            for value in layer.iter_mut() {
                *value = value.clamp(0.0, max);
            }
        }
    }

    /// One explicit pass of `c' = (1 - a) c + a mean4(c)`, reflecting at the edges.
    fn smooth(&mut self, layer: usize, alpha: f32) {
        let (w, h) = (self.width, self.height);
        let src = &self.layers[layer];
        let dst = &mut self.back_buffer;
        for y in 0..h {
            for x in 0..w {
                let idx = y * w + x;
                let c = src[idx];
                let up = if y > 0 { src[idx - w] } else { c };
                let down = if y + 1 < h { src[idx + w] } else { c };
                let left = if x > 0 { src[idx - 1] } else { c };
                let right = if x + 1 < w { src[idx + 1] } else { c };
                let mean = (up + down + left + right) * 0.25;
                dst[idx] = (1.0 - alpha) * c + alpha * mean;
            }
        }
        std::mem::swap(&mut self.layers[layer], &mut self.back_buffer);
    }

    /// Sum of one layer, used by tests and diagnostics.
    #[must_use]
    pub fn total(&self, morphogen: Morphogen) -> f64 {
        self.layers[morphogen.index()]
            .iter()
            .map(|&v| f64::from(v))
            .sum()
    }

    /// Smallest and largest value across every layer.
    #[must_use]
    pub fn bounds(&self) -> (f32, f32) {
        self.layers
            .iter()
            .flatten()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
