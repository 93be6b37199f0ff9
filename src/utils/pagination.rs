//! Paginación y ordenamiento de listados
//!
//! Los parámetros siguen la convención `?page=0&size=10&sort=field,asc`.
//! Los campos ordenables se resuelven contra una lista blanca por recurso,
//! de modo que la columna SQL nunca sale directamente de la petición.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::errors::{bad_request_error, AppResult};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Parámetros de consulta tal como llegan en la URL
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// NULL ordena antes que cualquier valor, igual que `SortValue`
    pub fn nulls_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "NULLS FIRST",
            SortDirection::Desc => "NULLS LAST",
        }
    }

    /// Cláusula completa `ORDER BY` con desempate por id
    pub fn order_by(&self, column: &str) -> String {
        format!("ORDER BY {} {} {}, id ASC", column, self.as_sql(), self.nulls_sql())
    }
}

/// Campo ordenable: nombre público (JSON) y columna SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    pub name: &'static str,
    pub column: &'static str,
}

/// Petición de página ya validada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl PageParams {
    /// Resolver los parámetros contra los campos permitidos del recurso.
    /// `allowed[0]` es el orden por defecto.
    pub fn resolve(&self, allowed: &[SortField]) -> AppResult<PageRequest> {
        let default_field = allowed
            .first()
            .copied()
            .ok_or_else(|| bad_request_error("resource has no sortable fields"))?;

        let (sort, direction) = match self.sort.as_deref().map(str::trim) {
            None | Some("") => (default_field, SortDirection::Asc),
            Some(raw) => {
                let mut parts = raw.splitn(2, ',').map(str::trim);
                let name = parts.next().unwrap_or_default();
                let field = allowed
                    .iter()
                    .find(|f| f.name == name)
                    .copied()
                    .ok_or_else(|| {
                        bad_request_error(&format!("unknown sort field '{}'", name))
                    })?;
                let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
                    None | Some("") | Some("asc") => SortDirection::Asc,
                    Some("desc") => SortDirection::Desc,
                    Some(other) => {
                        return Err(bad_request_error(&format!(
                            "unknown sort direction '{}'",
                            other
                        )))
                    }
                };
                (field, direction)
            }
        };

        Ok(PageRequest {
            page: self.page.unwrap_or(0),
            size: self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            sort,
            direction,
        })
    }
}

/// Página de resultados
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size.max(1));
        let total_pages = total_elements.div_ceil(size);
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

/// Valor de ordenamiento usado por los repositorios en memoria
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum SortValue {
    Int(i64),
    Float(f64),
    Text(String),
    Time(Option<NaiveDateTime>),
}

pub trait Sortable {
    fn id(&self) -> i64;
    fn sort_value(&self, column: &str) -> SortValue;
}

/// Ordenar y recortar registros en memoria según la petición
pub fn paginate<T: Sortable + Clone>(mut rows: Vec<T>, request: &PageRequest) -> Page<T> {
    rows.sort_by(|a, b| {
        let ordering = a
            .sort_value(request.sort.column)
            .partial_cmp(&b.sort_value(request.sort.column))
            .unwrap_or(Ordering::Equal);
        let ordering = match request.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id().cmp(&b.id()))
    });

    let total = rows.len() as u64;
    let content = rows
        .into_iter()
        .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
        .take(request.size as usize)
        .collect();

    Page::new(content, request, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[SortField] = &[
        SortField { name: "id", column: "id" },
        SortField { name: "dispatchTime", column: "dispatch_time" },
    ];

    #[derive(Clone, Debug)]
    struct Row(i64, i64);

    impl Sortable for Row {
        fn id(&self) -> i64 {
            self.0
        }
        fn sort_value(&self, column: &str) -> SortValue {
            match column {
                "dispatch_time" => SortValue::Int(self.1),
                _ => SortValue::Int(self.0),
            }
        }
    }

    #[test]
    fn test_defaults() {
        let request = PageParams::default().resolve(FIELDS).unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.sort.name, "id");
        assert_eq!(request.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_parsing() {
        let params = PageParams {
            page: Some(2),
            size: Some(500),
            sort: Some("dispatchTime,DESC".to_string()),
        };
        let request = params.resolve(FIELDS).unwrap();
        assert_eq!(request.sort.column, "dispatch_time");
        assert_eq!(request.direction, SortDirection::Desc);
        assert_eq!(request.size, MAX_PAGE_SIZE);
        assert_eq!(request.offset(), 200);
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let params = PageParams {
            sort: Some("password".to_string()),
            ..Default::default()
        };
        assert!(params.resolve(FIELDS).is_err());

        let params = PageParams {
            sort: Some("id,sideways".to_string()),
            ..Default::default()
        };
        assert!(params.resolve(FIELDS).is_err());
    }

    #[test]
    fn test_paginate_breaks_ties_by_id() {
        let rows = vec![Row(3, 1), Row(1, 1), Row(2, 0), Row(4, 5)];
        let request = PageParams {
            page: Some(0),
            size: Some(3),
            sort: Some("dispatchTime".to_string()),
        }
        .resolve(FIELDS)
        .unwrap();

        let page = paginate(rows, &request);
        let ids: Vec<i64> = page.content.iter().map(|r| r.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages, 2);
    }
}
