use crate::thermal_pipeline::common::error::{Result, ThermalError};
use crate::thermal_pipeline::frame::IntensityChannel;

/// Reduces both dimensions by `factor` using area averaging.
///
/// Each output cell is the mean of its `factor x factor` input block,
/// rounded half up. Rows and columns left over when a dimension is not a
/// multiple of `factor` are dropped. `factor == 1` returns a copy.
pub fn downsample(channel: &IntensityChannel, factor: usize) -> Result<IntensityChannel> {
    if factor == 0 {
        return Err(ThermalError::InvalidDownsampleFactor(factor));
    }
    if factor == 1 {
        return Ok(channel.clone());
    }

    let width = channel.width();
    let new_width = width / factor;
    let new_height = channel.height() / factor;
    if new_width == 0 || new_height == 0 {
        return IntensityChannel::new(new_width, new_height, Vec::new());
    }
    // factor fits inside the grid here, so factor^2 is bounded by its length
    let area = (factor * factor) as u64;
    let input = channel.data();

    let mut output = Vec::with_capacity(new_width * new_height);
    for out_y in 0..new_height {
        for out_x in 0..new_width {
            let mut sum = 0u64;
            for in_y in out_y * factor..(out_y + 1) * factor {
                let row = &input[in_y * width + out_x * factor..in_y * width + (out_x + 1) * factor];
                sum += row.iter().map(|&v| v as u64).sum::<u64>();
            }
            // Mean of u8 samples never exceeds 255
            output.push(((sum + area / 2) / area) as u8);
        }
    }

    IntensityChannel::new(new_width, new_height, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> IntensityChannel {
        let data = (0..width * height).map(|i| (i * 7 % 256) as u8).collect();
        IntensityChannel::new(width, height, data).unwrap()
    }

    #[test]
    fn factor_one_is_identity() {
        let channel = gradient(256, 192);
        assert_eq!(downsample(&channel, 1).unwrap(), channel);
    }

    #[test]
    fn uniform_field_is_invariant() {
        for factor in [2, 3, 4, 5, 8] {
            let channel = IntensityChannel::filled(256, 192, 173);
            let reduced = downsample(&channel, factor).unwrap();
            assert_eq!(reduced.width(), 256 / factor);
            assert_eq!(reduced.height(), 192 / factor);
            assert!(reduced.data().iter().all(|&v| v == 173), "factor {}", factor);
        }
    }

    #[test]
    fn averages_each_block() {
        let channel = IntensityChannel::new(4, 2, vec![
            0, 10, 100, 101,
            20, 30, 102, 102,
        ]).unwrap();
        let reduced = downsample(&channel, 2).unwrap();
        assert_eq!(reduced.width(), 2);
        assert_eq!(reduced.height(), 1);
        // 60 / 4 = 15; 405 / 4 = 101.25
        assert_eq!(reduced.data(), &[15, 101]);
    }

    #[test]
    fn rounds_to_nearest() {
        let channel = IntensityChannel::new(2, 2, vec![0, 0, 1, 1]).unwrap();
        // 2 / 4 = 0.5 rounds up
        assert_eq!(downsample(&channel, 2).unwrap().data(), &[1]);
        let channel = IntensityChannel::new(2, 2, vec![0, 0, 0, 1]).unwrap();
        assert_eq!(downsample(&channel, 2).unwrap().data(), &[0]);
    }

    #[test]
    fn remainder_rows_and_columns_are_dropped() {
        let mut data = vec![50u8; 7 * 5];
        // last column and last row hold outliers that must be ignored
        for y in 0..5 {
            data[y * 7 + 6] = 255;
        }
        for x in 0..7 {
            data[4 * 7 + x] = 255;
        }
        let channel = IntensityChannel::new(7, 5, data).unwrap();
        let reduced = downsample(&channel, 2).unwrap();
        assert_eq!((reduced.width(), reduced.height()), (3, 2));
        assert!(reduced.data().iter().all(|&v| v == 50));
    }

    #[test]
    fn zero_factor_is_rejected() {
        let channel = IntensityChannel::filled(4, 4, 0);
        assert!(matches!(downsample(&channel, 0), Err(ThermalError::InvalidDownsampleFactor(0))));
    }

    #[test]
    fn factor_larger_than_grid_gives_empty_output() {
        let channel = IntensityChannel::filled(4, 4, 9);
        let reduced = downsample(&channel, 5).unwrap();
        assert_eq!((reduced.width(), reduced.height()), (0, 0));
    }

    #[test]
    fn huge_factor_gives_empty_output() {
        let channel = IntensityChannel::filled(256, 192, 9);
        let reduced = downsample(&channel, 1usize << 32).unwrap();
        assert_eq!((reduced.width(), reduced.height()), (0, 0));
        assert!(reduced.data().is_empty());

        let reduced = downsample(&channel, usize::MAX).unwrap();
        assert_eq!((reduced.width(), reduced.height()), (0, 0));
    }

    #[test]
    fn factor_equal_to_short_side_gives_one_row() {
        let channel = IntensityChannel::filled(256, 192, 40);
        let reduced = downsample(&channel, 192).unwrap();
        assert_eq!((reduced.width(), reduced.height()), (1, 1));
        assert_eq!(reduced.data(), &[40]);
    }
}
