//! End-to-end scenarios across the tax, pricing, currency and document rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tourdesk_core::EngineError;
use tourdesk_core::billing::{InvoiceAmounts, LineItem, PaymentRecord, PaymentSummary, price_line};
use tourdesk_core::currency::{CurrencyConverter, ExchangeRate, RateTable};
use tourdesk_core::documents::{DocumentType, NationalId, normalize, validate_tax_id};
use tourdesk_core::pricing::{
    InMemoryCatalog, PricePeriod, Season, SupplierService, resolve_for_service,
};
use tourdesk_core::tax::{TaxCalculator, compute_tax};
use tourdesk_shared::config::TaxConfig;
use tourdesk_shared::types::{CurrencyCode, Money};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn money(amount: Decimal, currency: CurrencyCode) -> Money {
    Money::new(amount, currency)
}

fn usd_pen(rate: Decimal, effective_date: NaiveDate) -> ExchangeRate {
    ExchangeRate::new(CurrencyCode::USD, CurrencyCode::PEN, rate, effective_date, "SUNAT").unwrap()
}

fn usd_pen_rates() -> RateTable {
    RateTable::from_rates([
        usd_pen(dec!(3.70), date(2024, 1, 1)),
        usd_pen(dec!(3.75), date(2024, 6, 1)),
    ])
    .unwrap()
}

// ============================================================================
// Tax
// ============================================================================
#[test]
fn test_igv_extracted_from_118() {
    let split = compute_tax(money(dec!(118.00), CurrencyCode::PEN), dec!(0.18), true).unwrap();
    assert_eq!(split.base_amount, dec!(100.00));
    assert_eq!(split.tax_amount, dec!(18.00));
    assert_eq!(split.total_amount, dec!(118.00));
}

#[test]
fn test_calculator_from_default_config() {
    let calculator = TaxCalculator::from_config(&TaxConfig::default()).unwrap();
    assert_eq!(calculator.rate(), dec!(0.18));

    let net = calculator.add_tax(money(dec!(250.00), CurrencyCode::PEN)).unwrap();
    let gross = calculator.extract_tax(net.total()).unwrap();
    assert_eq!(gross.base_amount, dec!(250.00));
}

// ============================================================================
// Pricing
// ============================================================================
#[test]
fn test_seasonal_hotel_pricing() {
    let room = SupplierService::new(
        "Double room, Hotel Plaza Cusco",
        money(dec!(95), CurrencyCode::USD),
    );
    let mut catalog = InMemoryCatalog::new();
    catalog.add_service(room.clone()).unwrap();

    let periods = [
        (Season::Low, date(2024, 1, 15), date(2024, 3, 31), dec!(80)),
        (Season::High, date(2024, 6, 1), date(2024, 8, 31), dec!(130)),
        (Season::Peak, date(2024, 6, 20), date(2024, 6, 30), dec!(160)),
    ];
    for (season, start, end, price) in periods {
        let price = money(price, CurrencyCode::USD);
        let period = PricePeriod::new(room.id, season, start, end, price).unwrap();
        catalog.add_period(period).unwrap();
    }

    let cases = [
        (date(2024, 2, 10), dec!(80), "low"),
        (date(2024, 4, 10), dec!(95), "base"),
        (date(2024, 6, 24), dec!(130), "high"),
        (date(2024, 8, 31), dec!(130), "high"),
        (date(2024, 9, 1), dec!(95), "base"),
    ];
    for (on, price, season) in cases {
        let resolution = resolve_for_service(&catalog, &room, on);
        assert_eq!(resolution.price, money(price, CurrencyCode::USD), "price on {on}");
        assert_eq!(resolution.season_label(), season, "season on {on}");
    }
}

// ============================================================================
// Currency
// ============================================================================
#[test]
fn test_conversion_uses_most_recent_rate_as_of_date() {
    let converter = CurrencyConverter::new(usd_pen_rates());
    let result = converter
        .convert(money(dec!(100), CurrencyCode::USD), CurrencyCode::PEN, date(2024, 3, 1))
        .unwrap();
    assert_eq!(result.rate, dec!(3.70));
    assert_eq!(result.converted, money(dec!(370.00), CurrencyCode::PEN));
}

#[test]
fn test_conversion_before_any_rate_fails() {
    let converter = CurrencyConverter::new(usd_pen_rates());
    let error = converter
        .convert(money(dec!(100), CurrencyCode::USD), CurrencyCode::PEN, date(2023, 6, 1))
        .unwrap_err();
    assert_eq!(error.error_code(), "RATE_NOT_FOUND");
}

#[test]
fn test_converted_sales_can_be_summarised() {
    let converter = CurrencyConverter::new(usd_pen_rates());
    let on = date(2024, 7, 1);

    let sales = [
        (money(dec!(40), CurrencyCode::USD), true),
        (money(dec!(150), CurrencyCode::PEN), false),
    ];
    let records: Vec<PaymentRecord> = sales
        .into_iter()
        .map(|(amount, paid)| {
            let converted = converter.convert(amount, CurrencyCode::PEN, on).unwrap().converted;
            if paid {
                PaymentRecord::paid_on(converted, on)
            } else {
                PaymentRecord::unpaid(converted)
            }
        })
        .collect();

    let summary = PaymentSummary::from_items(&records).unwrap().unwrap();
    assert_eq!(summary.paid, money(dec!(150.00), CurrencyCode::PEN));
    assert_eq!(summary.pending, money(dec!(150), CurrencyCode::PEN));
    assert_eq!(summary.total, money(dec!(300.00), CurrencyCode::PEN));
}

// ============================================================================
// Billing
// ============================================================================
#[test]
fn test_invoice_from_priced_lines() {
    let calculator = TaxCalculator::new(dec!(0.18)).unwrap();
    let lines = [
        LineItem::new("City tour", money(dec!(60), CurrencyCode::PEN), 4),
        LineItem::new("Airport transfer", money(dec!(35.50), CurrencyCode::PEN), 2),
    ];

    let subtotal = lines
        .iter()
        .map(|line| price_line(line, &calculator).unwrap().tax.base())
        .try_fold(Money::zero(CurrencyCode::PEN), Money::checked_add)
        .unwrap();
    assert_eq!(subtotal, money(dec!(311.00), CurrencyCode::PEN));

    let invoice = InvoiceAmounts::from_subtotal(subtotal, &calculator).unwrap();
    assert_eq!(invoice.tax_amount, money(dec!(55.98), CurrencyCode::PEN));
    assert_eq!(invoice.total_amount, money(dec!(366.98), CurrencyCode::PEN));
    assert!(invoice.validate().is_ok());
}

// ============================================================================
// Documents
// ============================================================================
#[test]
fn test_customer_documents() {
    assert_eq!(normalize(DocumentType::NationalId, "4.567.890"), "04567890");

    let ruc = NationalId::new("ruc".parse().unwrap(), "20-13131295-5");
    assert_eq!(ruc.validate().unwrap(), "20131312955");
    assert!(validate_tax_id("20100070971"));
    assert!(!validate_tax_id("20100070970"));

    let error = "carnet".parse::<DocumentType>().unwrap_err();
    assert!(matches!(error, EngineError::InvalidDocument(_)));
}
