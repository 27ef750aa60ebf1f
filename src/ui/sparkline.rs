// Inline sparklines for table rows and scaling for the detail chart.

const RAMP: [char; 8] = [
    '\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}', '\u{2588}',
];

const EMPTY_GLYPH: &str = "\u{2014}";

// Min-max normalized block-glyph strip at a fixed cell width.
// An empty series renders the placeholder glyph instead of an empty strip.
pub fn spark_string(data: &[f64], width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if data.is_empty() {
        return EMPTY_GLYPH.to_string();
    }

    let sampled = downsample(data, width);
    let min = sampled.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = sampled.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    sampled
        .iter()
        .map(|v| {
            if range == 0.0 {
                // constant series draws a flat mid-height line
                RAMP[3]
            } else {
                let level = (((v - min) / range) * 7.0).round() as usize;
                RAMP[level.min(7)]
            }
        })
        .collect()
}

// Scale a series into 0..=height*8 levels for the braille Sparkline widget.
pub fn chart_levels(data: &[f64], width: usize, height: usize) -> Vec<u64> {
    let resolution = height.max(1) as f64 * 8.0;
    let sampled = downsample(data, width);
    let min = sampled.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = sampled.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        vec![(resolution / 2.0) as u64; sampled.len()]
    } else {
        sampled
            .iter()
            .map(|p| ((p - min) / range * resolution) as u64)
            .collect()
    }
}

// Bucketed min-max reduction that keeps peaks and valleys visible.
pub fn downsample(data: &[f64], target_len: usize) -> Vec<f64> {
    if target_len == 0 || data.is_empty() {
        return vec![];
    }
    if data.len() <= target_len {
        return data.to_vec();
    }
    let mut result = Vec::with_capacity(target_len);
    let bucket_size = data.len() as f64 / target_len as f64;
    for i in 0..target_len {
        let start = (i as f64 * bucket_size) as usize;
        let end = (((i + 1) as f64 * bucket_size) as usize).min(data.len());
        if start >= end {
            if let Some(&last) = result.last() {
                result.push(last);
            }
            continue;
        }
        let slice = &data[start..end];
        let min = slice.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        match result.last() {
            // keep whichever extreme moves further from the previous point
            Some(&prev) => {
                if f64::abs(min - prev) > f64::abs(max - prev) {
                    result.push(min);
                } else {
                    result.push(max);
                }
            }
            None => result.push(slice[slice.len() - 1]),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_renders_placeholder() {
        assert_eq!(spark_string(&[], 12), "\u{2014}");
        assert_eq!(spark_string(&[1.0], 0), "");
    }

    #[test]
    fn constant_series_is_flat() {
        let s = spark_string(&[42.0; 30], 10);
        assert_eq!(s.chars().count(), 10);
        let first = s.chars().next().unwrap();
        assert!(s.chars().all(|c| c == first));
    }

    #[test]
    fn output_is_capped_to_width() {
        let data: Vec<f64> = (0..500).map(|i| i as f64).collect();
        assert_eq!(spark_string(&data, 20).chars().count(), 20);
        // short series keeps one glyph per point
        assert_eq!(spark_string(&[1.0, 2.0, 3.0], 20).chars().count(), 3);
    }

    #[test]
    fn rising_series_rises() {
        let data: Vec<f64> = (1..=8).map(|i| i as f64).collect();
        let s = spark_string(&data, 8);
        let levels: Vec<u32> = s.chars().map(|c| c as u32).collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(s.chars().next().unwrap(), '\u{2581}');
        assert_eq!(s.chars().last().unwrap(), '\u{2588}');
    }

    #[test]
    fn chart_levels_span_the_resolution() {
        let levels = chart_levels(&[10.0, 20.0, 15.0], 10, 4);
        assert_eq!(levels.len(), 3);
        assert_eq!(*levels.iter().min().unwrap(), 0);
        assert_eq!(*levels.iter().max().unwrap(), 32);
    }

    #[test]
    fn chart_levels_flat_when_range_is_zero() {
        let levels = chart_levels(&[7.0; 5], 10, 4);
        assert_eq!(levels, vec![16; 5]);
    }

    #[test]
    fn downsample_hits_target_length() {
        let data: Vec<f64> = (0..1000).map(|i| (i as f64).sin()).collect();
        assert_eq!(downsample(&data, 80).len(), 80);
        assert_eq!(downsample(&data, 2000).len(), 1000);
        assert!(downsample(&[], 10).is_empty());
        assert!(downsample(&data, 0).is_empty());
    }
}
