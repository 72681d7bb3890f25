//! Ledger seeder for Kasbon development and testing.
//!
//! Seeds demo customer accounts across two branches, runs a few charges
//! and payments through the payment processor, and prints the resulting
//! statements.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use kasbon_core::account::{AccountType, CreateAccountInput};
use kasbon_core::journal::{EntryDetails, PaymentMethod, TransactionKind};
use kasbon_shared::{AppConfig, TenantScope};
use kasbon_store::{
    AccountRepository, EventBus, JsonFileStore, PaymentProcessor, StatementExporter, StoreHandle,
    TransactionRepository,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kasbon=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().unwrap_or_default();

    println!("Opening snapshot store at {}...", config.store.data_dir);
    let store = Arc::new(JsonFileStore::new(&config.store.data_dir)?);
    let handle = StoreHandle::new(store);

    let accounts = AccountRepository::new(handle.clone());
    let transactions = TransactionRepository::new(handle.clone());
    let statements = StatementExporter::new(handle.clone());
    let processor = PaymentProcessor::with_config(handle, EventBus::new(), &config.ledger);

    let jakarta = TenantScope::new("warung-jaya", "jakarta-pusat");
    let bandung = TenantScope::new("warung-jaya", "bandung-kota");

    println!("Seeding accounts for {jakarta}...");
    let budi = accounts
        .create(
            &jakarta,
            CreateAccountInput {
                customer_name: "Budi Santoso".to_string(),
                account_type: AccountType::Individual,
                phone: "0812-1111-2222".to_string(),
                email: Some("budi@example.com".to_string()),
                address: Some("Jl. Merdeka 12, Jakarta".to_string()),
                credit_limit: dec!(5000000),
                is_employee: false,
            },
        )
        .await?;
    println!("  Created {} ({})", budi.customer_name, budi.account_number);

    let kantin = accounts
        .create(
            &jakarta,
            CreateAccountInput {
                customer_name: "Kantin Sejahtera".to_string(),
                account_type: AccountType::Corporate,
                phone: "021-555-0147".to_string(),
                email: None,
                address: Some("Jl. Sudirman 88, Jakarta".to_string()),
                credit_limit: dec!(20000000),
                is_employee: false,
            },
        )
        .await?;
    println!(
        "  Created {} ({})",
        kantin.customer_name, kantin.account_number
    );

    println!("Seeding accounts for {bandung}...");
    let sari = accounts
        .create(
            &bandung,
            CreateAccountInput {
                customer_name: "Sari Dewi".to_string(),
                account_type: AccountType::Individual,
                phone: "0813-3333-4444".to_string(),
                email: None,
                address: None,
                credit_limit: dec!(2000000),
                is_employee: true,
            },
        )
        .await?;
    println!("  Created {} ({})", sari.customer_name, sari.account_number);

    println!("Applying charges and payments...");
    processor
        .apply_charge(
            &jakarta,
            budi.id,
            dec!(1200000),
            EntryDetails {
                sale_number: Some("INV-2025-0001".to_string()),
                notes: Some("Groceries on account".to_string()),
                ..EntryDetails::default()
            },
        )
        .await?;
    processor
        .apply_payment(
            &jakarta,
            budi.id,
            dec!(500000),
            EntryDetails {
                payment_method: Some(PaymentMethod::Cash),
                ..EntryDetails::default()
            },
        )
        .await?;

    processor
        .apply_charge(
            &jakarta,
            kantin.id,
            dec!(7500000),
            EntryDetails {
                sale_number: Some("INV-2025-0002".to_string()),
                ..EntryDetails::default()
            },
        )
        .await?;
    processor
        .apply_payment(
            &jakarta,
            kantin.id,
            dec!(7500000),
            EntryDetails {
                payment_method: Some(PaymentMethod::Transfer),
                ..EntryDetails::default()
            },
        )
        .await?;

    processor
        .apply_charge(&bandung, sari.id, dec!(350000), EntryDetails::default())
        .await?;

    println!("Verifying journal replay...");
    for (scope, id) in [(&jakarta, budi.id), (&jakarta, kantin.id), (&bandung, sari.id)] {
        let replayed = transactions.verify_replay(scope, id).await?;
        println!("  Account {id}: replayed balance {replayed}");
    }

    println!("Statements for {jakarta}:");
    for statement in statements.export_all(&jakarta).await? {
        println!(
            "  {} {} | balance {} | charges {} | payments {}",
            statement.account_number,
            statement.customer_name,
            statement.current_balance,
            statement.totals.total_charges,
            statement.totals.total_payments,
        );
        for line in &statement.lines {
            let sign = match line.kind {
                TransactionKind::Debit => "+",
                TransactionKind::Credit => "-",
            };
            println!(
                "    {} {}{} -> {}",
                line.occurred_at.format("%Y-%m-%d %H:%M:%S"),
                sign,
                line.amount,
                line.running_balance,
            );
        }
    }

    let bandung_total: Decimal = statements
        .export_all(&bandung)
        .await?
        .iter()
        .map(|statement| statement.current_balance)
        .sum();
    println!("Outstanding balance for {bandung}: {bandung_total}");

    println!("Seeding complete!");
    Ok(())
}
