use serde::Serialize;

/// Upper bound on the number of records handed back for a single query.
pub const MAX_RESULTS: usize = 10;

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRecord {
    pub url: String,
    pub title: String,
    pub description: String,
}

impl ResultRecord {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> ResultRecord {
        ResultRecord {
            url: url.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Ordered list of at most [`MAX_RESULTS`] records.
///
/// Serializes as a bare JSON array. The only way in is the truncating
/// `from_records`, so the length bound always holds.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ResultList(Vec<ResultRecord>);

impl ResultList {
    /// Keeps the first `MAX_RESULTS` records, in order.
    pub fn from_records<I>(records: I) -> ResultList
    where
        I: IntoIterator<Item = ResultRecord>,
    {
        ResultList(records.into_iter().take(MAX_RESULTS).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ResultRecord] {
        &self.0
    }
}

#[test]
fn test_result_list_is_bounded() {
    let records = (0..25).map(|i| ResultRecord::new(format!("https://{i}"), "", ""));
    let list = ResultList::from_records(records);
    assert_eq!(list.len(), MAX_RESULTS);
    assert_eq!(list.as_slice()[0].url, "https://0");
    assert_eq!(list.as_slice()[9].url, "https://9");
}

#[test]
fn test_result_list_serializes_as_array() {
    let list = ResultList::from_records(vec![ResultRecord::new("https://a", "A", "a")]);
    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{"url": "https://a", "title": "A", "description": "a"}])
    );
}
