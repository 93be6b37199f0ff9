//! Modelo de Driver

use serde::Serialize;
use sqlx::FromRow;

use crate::utils::pagination::{SortField, SortValue, Sortable};

#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Driver {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDriver {
    pub name: String,
}

impl Driver {
    pub const SORT_FIELDS: &'static [SortField] = &[
        SortField { name: "id", column: "id" },
        SortField { name: "name", column: "name" },
    ];

    pub fn from_new(id: i64, new: NewDriver) -> Self {
        Self { id, name: new.name }
    }
}

impl Sortable for Driver {
    fn id(&self) -> i64 {
        self.id
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "name" => SortValue::Text(self.name.clone()),
            _ => SortValue::Int(self.id),
        }
    }
}
