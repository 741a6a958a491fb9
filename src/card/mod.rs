use log::info;
use rust_decimal::Decimal;
use serde::Deserialize;
use crate::client::session::AuthSession;
use crate::client::Transport;
use crate::common::null_as_default;
use crate::error::ExportError;

const LOAD_ALL_CARDS_PATH: &str = "/msrservice/LoadAllCardsData?format=json";

/// A card linked to the account, as returned by `LoadAllCardsData`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub(crate) struct Card {
    #[serde(rename = "OldCardNumber", deserialize_with = "null_as_default")]
    pub(crate) number: String,

    /// Number of the card this one was transferred to, if any
    #[serde(rename = "NewCardNumber")]
    pub(crate) transfer_number: Option<String>,

    #[serde(rename = "IsActive", deserialize_with = "null_as_default")]
    pub(crate) active: bool,

    #[serde(rename = "Amount", deserialize_with = "null_as_default")]
    pub(crate) amount: Decimal,

    #[serde(rename = "Stars", deserialize_with = "null_as_default")]
    pub(crate) stars: i64,

    #[serde(rename = "Currency", deserialize_with = "null_as_default")]
    pub(crate) currency: String,

    /// Separates key/value pairs in search strings for this card
    #[serde(rename = "DataStringSeparator", deserialize_with = "null_as_default")]
    pub(crate) data_separator: String,

    /// Separates a key from its value in search strings for this card
    #[serde(rename = "PropertyValueStringSeparator", deserialize_with = "null_as_default")]
    pub(crate) property_separator: String,
}

#[derive(Deserialize, Debug, Default)]
struct LoadAllCardsDataResponse {
    #[serde(rename = "OldCardNumbers", default, deserialize_with = "null_as_default")]
    cards: Vec<Card>,
}

pub(crate) fn list_cards<T: Transport>(session: &AuthSession<T>) -> Result<Vec<Card>, ExportError> {
    let response: LoadAllCardsDataResponse = session.post_json(LOAD_ALL_CARDS_PATH, None)?;
    info!("Found {} cards", response.cards.len());
    Ok(response.cards)
}
