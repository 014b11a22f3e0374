/// A sine oscillator sampling a wave at a fixed sample rate.
///
/// The phase starts at zero, so two oscillators with the same parameters
/// produce the exact same samples.
#[derive(Debug, Clone)]
pub struct Oscillator {
    sample_rate: f64,
    frequency: f64,
    phase_offset: f64,
}

impl Oscillator {
    pub fn new(sample_rate: f64, frequency: f64) -> Self {
        Self {
            sample_rate,
            frequency,
            phase_offset: 0.0,
        }
    }

    pub fn next_sample(&mut self) -> f64 {
        let phase = self.phase_offset;
        // Increment phase
        let phase_increment = self.frequency / self.sample_rate;
        self.phase_offset = (self.phase_offset + phase_increment).fract();
        use std::f64::consts::PI;
        (phase * 2.0 * PI).sin()
    }
}

impl Iterator for Oscillator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_sample())
    }
}
