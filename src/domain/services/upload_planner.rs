//! # Upload Planner Service
//!
//! 宛先名の解決とスキップ判定

use crate::domain::entities::file_item::FileItem;
use crate::domain::entities::upload_plan::{PlannedAction, PlannedUpload, UploadPlan};
use crate::domain::errors::CopyError;

/// アップロード計画サービス
pub struct UploadPlanner;

impl UploadPlanner {
    /// ソースと宛先からアップロード計画を作成
    ///
    /// # Arguments
    ///
    /// * `sources` - ソースファイル
    /// * `destinations` - 宛先（インデックスでソースと対応）。`None` の場合はソースのファイル名を使う
    ///
    /// # Errors
    ///
    /// 宛先の数がソースと一致しない場合、またはファイル名を取り出せない場合にエラーを返す
    pub fn plan(
        sources: &[FileItem],
        destinations: Option<&[FileItem]>,
    ) -> Result<UploadPlan, CopyError> {
        if let Some(destinations) = destinations {
            if destinations.len() != sources.len() {
                return Err(CopyError::DestinationCountMismatch {
                    sources: sources.len(),
                    destinations: destinations.len(),
                });
            }
        }

        let mut entries = Vec::with_capacity(sources.len());
        for (index, source) in sources.iter().enumerate() {
            let destination = match destinations {
                Some(destinations) => destinations[index].path.clone(),
                None => source.file_name()?.to_string(),
            };

            let action = match source.content_type() {
                Some(content_type) => PlannedAction::Skip {
                    content_type: content_type.to_string(),
                },
                None => PlannedAction::Upload,
            };

            entries.push(PlannedUpload {
                index,
                source: source.path.clone(),
                destination,
                action,
            });
        }

        Ok(UploadPlan::new(entries))
    }
}
