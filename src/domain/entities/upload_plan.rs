//! # UploadPlan Value Object
//!
//! ファイルごとのアップロード計画

/// ファイルに対する処理
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// 既存Blobを削除してからアップロード
    Upload,
    /// Content-Type が指定されているためスキップ
    Skip { content_type: String },
}

/// 1ファイル分の計画
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    /// ソースリスト内のインデックス
    pub index: usize,
    /// ローカルファイルのパス
    pub source: String,
    /// コンテナ内のBlob名
    pub destination: String,
    /// 処理内容
    pub action: PlannedAction,
}

impl PlannedUpload {
    /// アップロード対象かどうか
    #[inline]
    pub fn is_upload(&self) -> bool {
        self.action == PlannedAction::Upload
    }
}

/// アップロード計画
///
/// ソースの順序を保った `PlannedUpload` のコレクション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPlan {
    entries: Vec<PlannedUpload>,
}

impl UploadPlan {
    pub fn new(entries: Vec<PlannedUpload>) -> Self {
        Self { entries }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PlannedUpload] {
        &self.entries
    }

    /// アップロード対象の数
    pub fn upload_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_upload()).count()
    }

    /// スキップ対象の数
    pub fn skip_count(&self) -> usize {
        self.len() - self.upload_count()
    }
}

impl IntoIterator for UploadPlan {
    type Item = PlannedUpload;
    type IntoIter = std::vec::IntoIter<PlannedUpload>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: usize, action: PlannedAction) -> PlannedUpload {
        PlannedUpload {
            index,
            source: format!("src/{}.bin", index),
            destination: format!("{}.bin", index),
            action,
        }
    }

    #[test]
    fn test_counts() {
        let plan = UploadPlan::new(vec![
            entry(0, PlannedAction::Upload),
            entry(
                1,
                PlannedAction::Skip {
                    content_type: "text/plain".to_string(),
                },
            ),
            entry(2, PlannedAction::Upload),
        ]);

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.upload_count(), 2);
        assert_eq!(plan.skip_count(), 1);
    }

    #[test]
    fn test_empty_plan() {
        let plan = UploadPlan::default();
        assert!(plan.is_empty());
        assert_eq!(plan.upload_count(), 0);
        assert_eq!(plan.skip_count(), 0);
    }

    #[test]
    fn test_into_iter_preserves_order() {
        let plan = UploadPlan::new(vec![
            entry(0, PlannedAction::Upload),
            entry(1, PlannedAction::Upload),
        ]);
        let indexes: Vec<usize> = plan.into_iter().map(|e| e.index).collect();
        assert_eq!(indexes, vec![0, 1]);
    }
}
