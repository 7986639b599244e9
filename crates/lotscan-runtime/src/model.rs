use crate::{Error, Result};
use lotscan_types::{VisionReply, VisionRequest};
use std::path::PathBuf;

/// The vision-model boundary.
///
/// Counting is delegated to an external model: the request carries image
/// bytes, a declared media type, and the composed prompt; the reply is
/// free-form text that is expected, but not guaranteed, to contain one JSON
/// object. Implementations own transport and auth; everything past this
/// trait treats any text shape as valid extractor input.
pub trait VisionModel {
    /// Short identifier for display and batch summaries.
    fn id(&self) -> &'static str;

    /// Blocking inference call. Failure is reported per image by the batch
    /// op; it never aborts a batch.
    fn analyze(&self, request: &VisionRequest) -> Result<VisionReply>;
}

/// Replays pre-fetched model output from disk: for `<dir>/<stem>.<ext>` the
/// reply is read from `<replies>/<stem>.txt`.
///
/// This is the offline path for re-running extraction and aggregation over
/// cached replies, and the model the CLI tests run against; a live API
/// client implements the same trait out of tree.
#[derive(Debug, Clone)]
pub struct ReplayModel {
    replies_dir: PathBuf,
}

impl ReplayModel {
    pub fn new(replies_dir: impl Into<PathBuf>) -> Self {
        Self {
            replies_dir: replies_dir.into(),
        }
    }
}

impl VisionModel for ReplayModel {
    fn id(&self) -> &'static str {
        "replay"
    }

    fn analyze(&self, request: &VisionRequest) -> Result<VisionReply> {
        let stem = request
            .image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                Error::Model(format!(
                    "cannot derive reply name from {}",
                    request.image_path.display()
                ))
            })?;

        let reply_path = self.replies_dir.join(format!("{stem}.txt"));
        let text = std::fs::read_to_string(&reply_path).map_err(|err| {
            Error::Model(format!("no reply at {}: {}", reply_path.display(), err))
        })?;

        Ok(VisionReply {
            text,
            input_tokens: None,
            output_tokens: None,
        })
    }
}
