// Device Record Domain Model

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered label -> value mapping produced by one detection run
///
/// Insertion order is query order and is preserved for display. The record is
/// append-only: a label already present is never overwritten, so any prefix an
/// observer sees mid-run is a prefix of the final record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRecord {
    fields: Vec<(String, String)>,
}

impl DeviceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field at the next position
    ///
    /// Returns false (and leaves the record untouched) if the label is
    /// already present.
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) -> bool {
        let label = label.into();
        if self.contains(&label) {
            return false;
        }
        self.fields.push((label, value.into()));
        true
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.fields.iter().any(|(l, _)| l == label)
    }

    /// Labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Serialized as a JSON object whose keys keep insertion order
impl Serialize for DeviceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut record = DeviceRecord::new();
        record.push("序列号", "0123456789ABCDEF");
        record.push("产品名称", "sunfish");
        record.push("Bootloader版本", "s5-0.3");

        let labels: Vec<&str> = record.labels().collect();
        assert_eq!(labels, vec!["序列号", "产品名称", "Bootloader版本"]);
        assert_eq!(record.get("产品名称"), Some("sunfish"));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_duplicate_label_is_rejected() {
        let mut record = DeviceRecord::new();
        assert!(record.push("设备型号", "Pixel 4a"));
        assert!(!record.push("设备型号", "Pixel 5"));

        assert_eq!(record.len(), 1);
        assert_eq!(record.get("设备型号"), Some("Pixel 4a"));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let mut record = DeviceRecord::new();
        record.push("设备型号", "Pixel 4a");
        record.push("Android版本", "13");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"设备型号":"Pixel 4a","Android版本":"13"}"#);
    }

    #[test]
    fn test_empty_record() {
        let record = DeviceRecord::new();
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }
}
