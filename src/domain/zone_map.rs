// ==========================================
// CycleEye 节拍分析系统 - 区域有序映射
// ==========================================
// 职责: 按配置的区域顺序保存 zone → 值
// 序列化: JSON 对象,键顺序 = 插入顺序
// ==========================================

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for ZoneMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ZoneMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖；覆盖时保留原位置
    pub fn insert(&mut self, zone: impl Into<String>, value: T) {
        let zone = zone.into();
        match self.entries.iter_mut().find(|(z, _)| *z == zone) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((zone, value)),
        }
    }

    pub fn get(&self, zone: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(z, _)| z == zone)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, zone: &str) -> bool {
        self.get(zone).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(z, _)| z.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(z, v)| (z.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for ZoneMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut map = ZoneMap::new();
        for (zone, value) in iter {
            map.insert(zone, value);
        }
        map
    }
}

impl<T: Serialize> Serialize for ZoneMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (zone, value) in &self.entries {
            map.serialize_entry(zone, value)?;
        }
        map.end()
    }
}
