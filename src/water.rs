//! Parametric sea surface.
//!
//! The surface is a sum of up to two sine trains, one travelling along `x` and
//! one along `z`, over a rectangular domain centred on the origin. Sampling is
//! pure: time enters only through [`WaterField::at_time`].

use alloc::vec::Vec;

use crate::config::WaterConfig;
use crate::float::Float;
use crate::vec::{Vec2, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct WaterField<F: Float> {
    pub width: F,
    pub depth: F,
    pub base_level: F,
    pub wave_height: F,
    pub period_x: F,
    pub period_z: F,
    pub on_x: bool,
    pub on_z: bool,
    pub wave_speed: F,
    /// Distance the wave trains have travelled.
    pub phase: F,
}

impl<F: Float> WaterField<F> {
    pub fn new(config: &WaterConfig<F>) -> Self {
        WaterField {
            width: config.width,
            depth: config.depth,
            base_level: config.level,
            wave_height: config.wave_height,
            period_x: config.period_x,
            period_z: config.period_z,
            on_x: config.waves_on_x,
            on_z: config.waves_on_z,
            wave_speed: config.wave_speed,
            phase: F::zero(),
        }
    }

    /// The same field with its wave trains advanced to `time`.
    pub fn at_time(&self, time: F) -> Self {
        WaterField { phase: self.wave_speed * time, ..self.clone() }
    }

    /// Map world `x`, `z` to normalized domain coordinates.
    pub fn world_to_uv(&self, x: F, z: F) -> (F, F) {
        let u = if self.width > F::zero() { x / self.width + F::half() } else { F::half() };
        let v = if self.depth > F::zero() { z / self.depth + F::half() } else { F::half() };
        (u, v)
    }

    fn uv_to_world(&self, u: F, v: F) -> (F, F) {
        ((u - F::half()) * self.width, (v - F::half()) * self.depth)
    }

    /// Angular wavenumber for a period, zero when the period is degenerate.
    fn wavenumber(period: F) -> F {
        if period.abs() > F::from_f32(1e-6) {
            F::two() * F::pi() / period
        } else {
            F::zero()
        }
    }

    /// Surface height at normalized `(u, v)`.
    pub fn height_at(&self, u: F, v: F) -> F {
        let (x, z) = self.uv_to_world(u, v);
        self.height_at_world(x, z)
    }

    /// Surface gradient `(dh/dx, dh/dz)` at normalized `(u, v)`, in world units.
    pub fn slope_at(&self, u: F, v: F) -> Vec2<F> {
        let (x, z) = self.uv_to_world(u, v);
        self.slope_at_world(x, z)
    }

    pub fn height_at_world(&self, x: F, z: F) -> F {
        let mut h = self.base_level;
        if self.on_x {
            h = h + self.wave_height * (Self::wavenumber(self.period_x) * (x - self.phase)).sin();
        }
        if self.on_z {
            h = h + self.wave_height * (Self::wavenumber(self.period_z) * (z - self.phase)).sin();
        }
        h
    }

    pub fn slope_at_world(&self, x: F, z: F) -> Vec2<F> {
        let mut slope = Vec2::new(F::zero(), F::zero());
        if self.on_x {
            let k = Self::wavenumber(self.period_x);
            slope.x = self.wave_height * k * (k * (x - self.phase)).cos();
        }
        if self.on_z {
            let k = Self::wavenumber(self.period_z);
            slope.y = self.wave_height * k * (k * (z - self.phase)).cos();
        }
        slope
    }

    /// Unit surface normal at world `x`, `z`.
    pub fn normal_at_world(&self, x: F, z: F) -> Vec3<F> {
        let s = self.slope_at_world(x, z);
        Vec3::new(-s.x, F::one(), -s.y).normalize()
    }

    /// Surface vertices on a `(resolution + 1)^2` grid, row-major in `v`.
    pub fn sample_grid(&self, resolution: usize) -> Vec<Vec3<F>> {
        let n = resolution.max(1);
        let step = F::one() / F::from_usize(n);
        let mut points = Vec::with_capacity((n + 1) * (n + 1));
        for j in 0..=n {
            for i in 0..=n {
                let (u, v) = (F::from_usize(i) * step, F::from_usize(j) * step);
                let (x, z) = self.uv_to_world(u, v);
                points.push(Vec3::new(x, self.height_at_world(x, z), z));
            }
        }
        points
    }
}
