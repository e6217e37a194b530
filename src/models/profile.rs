use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub age: Option<u32>,
}

/// Daily nutrition counters shown as tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyData {
  pub calorie_count: Option<u32>,
  pub protein_count: Option<u32>,
  pub carbohydrate_count: Option<u32>,
  pub lipid_count: Option<u32>,
}

/// One key-data tile: `{count}{unit}` above its title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyDataTile {
  pub title: &'static str,
  pub count: Option<u32>,
  pub unit: &'static str,
  pub bg_color: &'static str,
}

impl KeyDataTile {
  /// Tile headline, empty when the counter is missing
  pub fn headline(&self) -> String {
    self
      .count
      .map(|count| format!("{}{}", count, self.unit))
      .unwrap_or_default()
  }
}

impl KeyData {
  pub fn tiles(&self) -> [KeyDataTile; 4] {
    [
      KeyDataTile {
        title: "Calories",
        count: self.calorie_count,
        unit: "kCal",
        bg_color: "rgba(255,0,0,0.07)",
      },
      KeyDataTile {
        title: "Proteines",
        count: self.protein_count,
        unit: "g",
        bg_color: "rgba(74,184,255,0.1)",
      },
      KeyDataTile {
        title: "Glucides",
        count: self.carbohydrate_count,
        unit: "g",
        bg_color: "rgba(249,206,35,0.1)",
      },
      KeyDataTile {
        title: "Lipides",
        count: self.lipid_count,
        unit: "g",
        bg_color: "rgba(253,81,129,0.1)",
      },
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  pub id: Option<u64>,
  pub user_infos: UserInfo,
  pub key_data: KeyData,
  /// Fraction of the daily goal reached, expected in `[0, 1]`
  pub today_score: Option<f64>,
}

impl Profile {
  pub fn new(id: Option<u64>, user_infos: UserInfo, key_data: KeyData, today_score: Option<f64>) -> Self {
    Self {
      id,
      user_infos,
      key_data,
      today_score,
    }
  }

  pub fn first_name(&self) -> Option<&str> {
    self.user_infos.first_name.as_deref()
  }

  pub fn calorie_count(&self) -> Option<u32> {
    self.key_data.calorie_count
  }

  pub fn protein_count(&self) -> Option<u32> {
    self.key_data.protein_count
  }

  pub fn carbohydrate_count(&self) -> Option<u32> {
    self.key_data.carbohydrate_count
  }

  pub fn lipid_count(&self) -> Option<u32> {
    self.key_data.lipid_count
  }

  pub fn key_data_tiles(&self) -> [KeyDataTile; 4] {
    self.key_data.tiles()
  }
}
