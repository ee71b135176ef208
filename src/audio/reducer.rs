// src/audio/reducer.rs
//! Reduces a full frequency snapshot to one intensity per visual element.

use super::source::FrequencySnapshot;

/// One normalized intensity per visual element.
///
/// Values are not clamped: spectrum intensities can exceed 1 and hover
/// intensities can go negative. Whoever renders them clamps.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityVector(Vec<f32>);

impl IntensityVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.0.get(index).copied()
    }

    /// Arithmetic mean, 0 for an empty vector.
    pub fn mean(&self) -> f32 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.iter().sum::<f32>() / self.0.len() as f32
    }
}

/// Sample `elements` bins at a fixed stride and divide by `travel`.
///
/// The stride is `round(len / elements)`; a sampled index past the end is
/// clamped to the last bin. No interpolation between bins.
pub fn reduce(snapshot: &FrequencySnapshot, elements: usize, travel: f32) -> IntensityVector {
    let bins = snapshot.as_slice();
    if bins.is_empty() || elements == 0 {
        return IntensityVector(vec![0.0; elements]);
    }

    let step = (bins.len() as f64 / elements as f64).round() as usize;
    let last = bins.len() - 1;
    let values = (0..elements)
        .map(|i| bins[(i * step).min(last)] as f32 / travel)
        .collect();
    IntensityVector(values)
}

/// Exponential smoothing applied on top of [`reduce`] when configured.
///
/// A factor of 0 passes values through unchanged.
pub struct Smoother {
    factor: f32,
    previous: Option<Vec<f32>>,
}

impl Smoother {
    pub fn new(factor: f32) -> Self {
        Self {
            factor: factor.clamp(0.0, 0.99),
            previous: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.factor > 0.0
    }

    pub fn apply(&mut self, current: IntensityVector) -> IntensityVector {
        if !self.is_enabled() {
            return current;
        }
        let smoothed: Vec<f32> = match &self.previous {
            Some(prev) if prev.len() == current.len() => prev
                .iter()
                .zip(current.as_slice())
                .map(|(p, c)| self.factor * p + (1.0 - self.factor) * c)
                .collect(),
            _ => current.0,
        };
        self.previous = Some(smoothed.clone());
        IntensityVector(smoothed)
    }

    /// Forget history, e.g. when a new track starts.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(len: usize, set: &[(usize, u8)]) -> FrequencySnapshot {
        let mut bins = vec![0u8; len];
        for &(i, v) in set {
            bins[i] = v;
        }
        FrequencySnapshot::from(bins)
    }

    #[test]
    fn samples_every_step_bins() {
        // 1024 / 7 rounds to 146
        let snap = snapshot_with(1024, &[(0, 200), (146, 100), (876, 50), (877, 255)]);
        let v = reduce(&snap, 7, 200.0);
        assert_eq!(v.len(), 7);
        assert_eq!(v.as_slice(), &[1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.25]);
    }

    #[test]
    fn first_bin_only_yields_single_intensity() {
        let snap = snapshot_with(1024, &[(0, 200)]);
        let travel = 240.0;
        let v = reduce(&snap, 7, travel);
        assert!((v.as_slice()[0] - 200.0 / travel).abs() < f32::EPSILON);
        assert!(v.as_slice()[1..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn matches_clamped_index_formula_for_many_shapes() {
        for len in [7usize, 8, 10, 13, 64, 100, 1000, 1024, 2048] {
            let bins: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let snap = FrequencySnapshot::from(bins.clone());
            for n in 1..=7usize.min(len) {
                let v = reduce(&snap, n, 100.0);
                assert_eq!(v.len(), n);
                let step = (len as f64 / n as f64).round() as usize;
                for i in 0..n {
                    let idx = (i * step).min(len - 1);
                    assert_eq!(v.as_slice()[i], bins[idx] as f32 / 100.0);
                }
            }
        }
    }

    #[test]
    fn rounding_up_the_step_stays_in_bounds() {
        // 13 / 7 rounds up to 2, so index 6 * 2 = 12 is the last bin
        let snap = FrequencySnapshot::from((0..13u8).collect::<Vec<_>>());
        assert_eq!(reduce(&snap, 7, 1.0).as_slice()[6], 12.0);
        let snap = FrequencySnapshot::from((0..5u8).collect::<Vec<_>>());
        // 5 / 3 rounds to 2: indices 0, 2, 4
        assert_eq!(reduce(&snap, 3, 1.0).as_slice(), &[0.0, 2.0, 4.0]);
        // 8 / 5 rounds to 2: index 4 * 2 = 8 is past the end and clamps to 7
        let snap = FrequencySnapshot::from((10..18u8).collect::<Vec<_>>());
        assert_eq!(
            reduce(&snap, 5, 1.0).as_slice(),
            &[10.0, 12.0, 14.0, 16.0, 17.0]
        );
    }

    #[test]
    fn empty_snapshot_gives_zeros() {
        let v = reduce(&FrequencySnapshot::from(Vec::new()), 7, 240.0);
        assert_eq!(v.as_slice(), &[0.0; 7]);
    }

    #[test]
    fn values_are_not_clamped() {
        let snap = snapshot_with(7, &[(0, 255)]);
        let v = reduce(&snap, 7, 200.0);
        assert!(v.as_slice()[0] > 1.0);
    }

    #[test]
    fn mean_of_vector() {
        let v = IntensityVector::new(vec![1.0, 0.0, 0.5, 0.5]);
        assert_eq!(v.mean(), 0.5);
        assert_eq!(IntensityVector::new(Vec::new()).mean(), 0.0);
    }

    #[test]
    fn disabled_smoother_passes_through() {
        let mut s = Smoother::new(0.0);
        let v = IntensityVector::new(vec![0.3, 0.7]);
        assert_eq!(s.apply(v.clone()), v);
    }

    #[test]
    fn smoother_blends_with_previous_frame() {
        let mut s = Smoother::new(0.5);
        s.apply(IntensityVector::new(vec![1.0, 0.0]));
        let out = s.apply(IntensityVector::new(vec![0.0, 1.0]));
        assert_eq!(out.as_slice(), &[0.5, 0.5]);

        s.reset();
        let out = s.apply(IntensityVector::new(vec![0.2, 0.2]));
        assert_eq!(out.as_slice(), &[0.2, 0.2]);
    }
}
