use log::{info, warn};
use rust_decimal::Decimal;
use serde::Deserialize;
use crate::card::Card;
use crate::client::session::AuthSession;
use crate::client::Transport;
use crate::common::null_as_default;
use crate::error::ExportError;

const TRANSACTION_DETAIL_PATH: &str = "/msrservice/TransactionDetail?format=json";

/// Hold transaction info returned from `TransactionDetail`. The date is kept as sent by the
/// backend, see [`crate::date::normalize`].
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub(crate) struct Transaction {
    #[serde(rename = "TransactionID", deserialize_with = "null_as_default")]
    pub(crate) id: i64,

    #[serde(rename = "TransactionCategory", deserialize_with = "null_as_default")]
    pub(crate) category: String,

    #[serde(rename = "Amount", deserialize_with = "null_as_default")]
    pub(crate) money_amount: Decimal,

    #[serde(rename = "MoneyBalance", deserialize_with = "null_as_default")]
    pub(crate) money_balance: Decimal,

    #[serde(rename = "Stars", deserialize_with = "null_as_default")]
    pub(crate) star_amount: i64,

    #[serde(rename = "StarsBalance", deserialize_with = "null_as_default")]
    pub(crate) star_balance: i64,

    #[serde(rename = "TransDateTime", deserialize_with = "null_as_default")]
    pub(crate) raw_date_time: String,

    #[serde(rename = "Description", deserialize_with = "null_as_default")]
    pub(crate) description: String,

    #[serde(rename = "Points", deserialize_with = "null_as_default")]
    pub(crate) points: i64,

    #[serde(rename = "LocationId", deserialize_with = "null_as_default")]
    pub(crate) location_id: i64,

    #[serde(rename = "Location", deserialize_with = "null_as_default")]
    pub(crate) location_name: String,

    #[serde(rename = "CheckNumber", deserialize_with = "null_as_default")]
    pub(crate) check_number: String,

    #[serde(rename = "Currency", deserialize_with = "null_as_default")]
    pub(crate) currency: String,
}

#[derive(Deserialize, Debug, Default)]
struct TransactionDetailResponse {
    #[serde(rename = "ReturnValue", default, deserialize_with = "null_as_default")]
    transactions: Vec<Transaction>,
}

/// Fetch every transaction of a card. There is no real paging: page 1 is requested with a
/// page size large enough to hold the whole history.
pub(crate) fn list_transactions<T: Transport>(session: &AuthSession<T>, card: &Card, page_size: u32) -> Result<Vec<Transaction>, ExportError> {
    let form = [
        ("CardNumber", card.number.clone()),
        ("SearchDataString", search_data_string(card, 1, page_size)),
    ];
    let response: TransactionDetailResponse = session.post_json(TRANSACTION_DETAIL_PATH, Some(&form[..]))?;

    let transactions = response.transactions;
    info!("Card {}: {} transactions", card.number, transactions.len());
    if transactions.len() >= page_size as usize {
        warn!("Card {} returned a full page of {} transactions, history may be truncated", card.number, page_size);
    }

    Ok(transactions)
}

/// Build the search blob `page<p>1<d>page_size<p>N`, where `<p>` and `<d>` are the card's own
/// property and data separators.
pub(crate) fn search_data_string(card: &Card, page: u32, page_size: u32) -> String {
    let property = &card.property_separator;
    format!("page{property}{page}{}page_size{property}{page_size}", card.data_separator)
}
