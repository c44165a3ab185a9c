//! Multichannel to mono downmix.

/// Collapse `frames` interleaved frames into one mono sample per frame.
///
/// Each mono sample is the arithmetic average of the frame: the channels are
/// summed in channel order and the sum is divided by `channels`. The result
/// is bit-exact and stays inside `[-1.0, 1.0]` whenever the input does.
pub fn multichannel_to_mono(input: &[f32], mono: &mut [f32], frames: usize, channels: usize) {
    debug_assert!(channels > 0);
    let norm = channels as f32;

    for (frame, m) in input[..frames * channels]
        .chunks_exact(channels)
        .zip(mono[..frames].iter_mut())
    {
        let sum: f32 = frame.iter().fold(0.0, |acc, &s| acc + s);
        *m = sum / norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stereo_average() {
        let input = [1.0, 0.0, 0.5, -0.5, -1.0, -1.0];
        let mut mono = [9.0; 3];

        multichannel_to_mono(&input, &mut mono, 3, 2);

        assert_eq!(mono, [0.5, 0.0, -1.0]);
    }

    #[test]
    fn test_mono_input_is_copied() {
        let input = [0.25, -0.75, 0.125];
        let mut mono = [0.0; 3];

        multichannel_to_mono(&input, &mut mono, 3, 1);

        assert_eq!(mono, input);
    }

    #[test]
    fn test_only_requested_frames_written() {
        let input = [0.2; 12];
        let mut mono = [7.0; 4];

        multichannel_to_mono(&input, &mut mono, 2, 3);

        assert!((mono[0] - 0.2).abs() < 1e-7);
        assert!((mono[1] - 0.2).abs() < 1e-7);
        assert_eq!(&mono[2..], &[7.0, 7.0]);
    }
}
