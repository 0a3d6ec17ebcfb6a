//! Many independent passes at once.
//!
//! Passes share no state, so a sequence of skeleton sets (animation frames,
//! parameter sweeps) can be meshed on separate threads. With the `parallel`
//! feature the frames are spread over rayon's global pool.

use isoblob_core::Skeleton;

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::extractor::Extractor;
use crate::mesh::Mesh;

/// Extract one mesh per skeleton set, in input order.
///
/// The configuration is checked once up front. Any invalid frame fails the
/// whole batch.
///
/// # Example
///
/// ```
/// use isoblob_rs::{extract_frames, ExtractionConfig, Point3, Skeleton};
///
/// let frames: Vec<Vec<Skeleton>> = (0..4)
///     .map(|i| vec![Skeleton::new(Point3::new(i as f32 * 0.05, 0.0, 0.0))])
///     .collect();
/// let meshes = extract_frames(&frames, &ExtractionConfig::default())?;
/// assert_eq!(meshes.len(), 4);
/// # Ok::<(), isoblob_rs::IsoError>(())
/// ```
pub fn extract_frames<S>(frames: &[S], config: &ExtractionConfig) -> Result<Vec<Mesh>>
where
    S: AsRef<[Skeleton]> + Sync,
{
    let extractor = Extractor::new(*config)?;
    log::debug!("extracting {} frames", frames.len());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        frames
            .par_iter()
            .map(|frame| extractor.extract(frame.as_ref()))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        frames
            .iter()
            .map(|frame| extractor.extract(frame.as_ref()))
            .collect()
    }
}
