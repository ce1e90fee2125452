//! Temperature-to-color mapping for renderers.

/// Map a temperature to an RGB triple on a blue (cold) to red (hot) ramp.
///
/// `0.0` maps to pure blue and `100.0` to pure red. Values outside that
/// range saturate.
pub fn temp_to_rgb(temp: f64) -> [u8; 3] {
    let value = (temp / 100.0 * 255.0).clamp(0.0, 255.0) as u8;
    [value, 0, 255 - value]
}
