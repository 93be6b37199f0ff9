use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{NewTransaction, Transaction, TransactionState};

// Request para crear o reemplazar una transacción
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub origin_location_id: i64,
    pub destiny_location_id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    #[serde(default)]
    pub dispatch_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub arrival_time: Option<NaiveDateTime>,
    #[validate(length(max = 80))]
    #[serde(default)]
    pub cargo_description: Option<String>,
}

impl TransactionRequest {
    pub fn into_new(self) -> NewTransaction {
        NewTransaction {
            origin_location_id: self.origin_location_id,
            destiny_location_id: self.destiny_location_id,
            vehicle_id: self.vehicle_id,
            driver_id: self.driver_id,
            dispatch_time: self.dispatch_time,
            arrival_time: self.arrival_time,
            cargo_description: self.cargo_description,
        }
    }
}

// Response de transacción, con el estado derivado
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i64,
    pub origin_location_id: i64,
    pub destiny_location_id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub dispatch_time: Option<NaiveDateTime>,
    pub arrival_time: Option<NaiveDateTime>,
    pub cargo_description: Option<String>,
    pub state: TransactionState,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        let state = transaction.state();
        Self {
            id: transaction.id,
            origin_location_id: transaction.origin_location_id,
            destiny_location_id: transaction.destiny_location_id,
            vehicle_id: transaction.vehicle_id,
            driver_id: transaction.driver_id,
            dispatch_time: transaction.dispatch_time,
            arrival_time: transaction.arrival_time,
            cargo_description: transaction.cargo_description,
            state,
        }
    }
}
