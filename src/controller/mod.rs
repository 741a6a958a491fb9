use std::io::Write;
use std::path::Path;
use log::{debug, info, warn};
use crate::card::list_cards;
use crate::client::session::AuthSession;
use crate::client::token::fetch_verification_token;
use crate::client::Transport;
use crate::config::{Config, MalformedDatePolicy};
use crate::date::normalize;
use crate::error::ExportError;
use crate::export::{transaction_record, PendingFile, TransactionCsvWriter};
use crate::transaction::list_transactions;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ExportSummary {
    pub(crate) cards: usize,
    pub(crate) transactions: usize,
    /// Transactions left out because their date could not be read
    pub(crate) skipped: usize,
}

/// Fetch the verification token and log in.
pub(crate) fn login<T: Transport>(transport: T, config: &Config, email: &str, password: &str) -> Result<AuthSession<T>, ExportError> {
    let token = fetch_verification_token(&transport, &config.login_page)?;
    AuthSession::login(transport, token, email, password)
}

/// Log in and export everything into `output`. The file only appears once the whole export
/// succeeded.
pub(crate) fn export_to_file<T: Transport>(transport: T, config: &Config, email: &str, password: &str, output: &Path) -> Result<ExportSummary, ExportError> {
    let session = login(transport, config, email, password)?;

    let pending = PendingFile::create(output)?;
    let mut writer = TransactionCsvWriter::new(pending.file());
    let summary = export_cards(&session, config, &mut writer)?;
    writer.finish()?;
    pending.commit()?;

    info!("Exported {} transactions from {} cards to {}", summary.transactions, summary.cards, output.display());
    Ok(summary)
}

/// Write the header, then every transaction of every card, one card at a time.
pub(crate) fn export_cards<T: Transport, W: Write>(session: &AuthSession<T>, config: &Config, writer: &mut TransactionCsvWriter<W>) -> Result<ExportSummary, ExportError> {
    writer.write_header()?;

    let mut summary = ExportSummary::default();
    let cards = list_cards(session)?;
    for card in &cards {
        info!("Found Card: Number {}, Active: {}, Balance: {} {}", card.number, card.active, card.currency, card.amount);
        summary.cards += 1;

        let transactions = list_transactions(session, card, config.page_size)?;
        for t in &transactions {
            debug!("{:?}", t);
            let date = match normalize(&t.raw_date_time) {
                Ok(date) => date,
                Err(e) if config.on_malformed_date == MalformedDatePolicy::Skip => {
                    warn!("Skipping transaction {} of card {}: {}", t.id, card.number, e);
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            writer.write_row(&transaction_record(&card.number, t, &date))?;
        }
    }

    summary.transactions = writer.rows();
    Ok(summary)
}
