use tracing::debug;

use crate::{
    capture::{CaptureSource, Shot},
    error::{CaptureError, Result},
    filters::FilterSetting,
};

/// Turns the live feed into still shots
///
/// The filter is baked into the stored pixels, and the shot is mirrored when
/// the preview the user saw was mirrored.
#[derive(Debug, Clone)]
pub struct FrameCapturer {
    mirror: bool,
}

impl FrameCapturer {
    pub fn new(mirror: bool) -> Self {
        Self { mirror }
    }

    pub fn mirrors(&self) -> bool {
        self.mirror
    }

    /// Capture one shot from a started source
    pub async fn capture<S: CaptureSource>(&self, source: &mut S, filter: FilterSetting) -> Result<Shot> {
        let (width, height) = source.readiness().wait().await?;

        let mut frame = source.grab_frame()?;
        if frame.width() != width || frame.height() != height {
            return Err(CaptureError::DimensionMismatch {
                expected_width: width,
                expected_height: height,
                actual_width: frame.width(),
                actual_height: frame.height(),
            }
            .into());
        }

        filter.effect().apply(&mut frame);
        if self.mirror {
            frame.mirror_horizontal();
        }

        debug!("Captured {}x{} shot from {} (filter: {}, mirrored: {})",
               width, height, source.name(), filter, self.mirror);

        Ok(Shot::new(frame, filter, self.mirror))
    }
}

impl Default for FrameCapturer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureConstraints, SyntheticSource};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_readiness() {
        let mut source = SyntheticSource::new(64, 48).ready_after(Duration::from_millis(500));
        source.start(&CaptureConstraints::default()).await.unwrap();

        let shot = FrameCapturer::new(false)
            .capture(&mut source, FilterSetting::None)
            .await
            .unwrap();

        assert_eq!((shot.width(), shot.height()), (64, 48));
        assert_eq!(source.frames_grabbed(), 1);
    }

    #[tokio::test]
    async fn test_mirrors_ramp() {
        let mut source = SyntheticSource::new(64, 8);
        source.start(&CaptureConstraints::default()).await.unwrap();

        let plain = FrameCapturer::new(false)
            .capture(&mut source, FilterSetting::None)
            .await
            .unwrap();
        let mirrored = FrameCapturer::new(true)
            .capture(&mut source, FilterSetting::None)
            .await
            .unwrap();

        // Red ramps left to right; mirroring reverses it
        assert!(plain.frame().get_pixel(0, 0)[0] < plain.frame().get_pixel(63, 0)[0]);
        assert_eq!(mirrored.frame().get_pixel(0, 0)[0], plain.frame().get_pixel(63, 0)[0]);
        assert!(mirrored.is_mirrored());
    }

    #[tokio::test]
    async fn test_bakes_filter_into_pixels() {
        let mut source = SyntheticSource::new(8, 8).with_palette(vec![[255, 0, 0]]);
        source.start(&CaptureConstraints::default()).await.unwrap();

        let shot = FrameCapturer::default()
            .capture(&mut source, FilterSetting::Bw)
            .await
            .unwrap();

        assert_eq!(shot.frame().get_pixel(4, 4), [54, 54, 54]);
        assert_eq!(shot.filter(), FilterSetting::Bw);
    }
}
