//! Request validation for lifecycle operations
//!
//! Mobile clients send monetary fields as JSON numbers or numeric strings.
//! Everything is parsed into `Decimal` here so the lifecycle core never sees
//! raw JSON.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use shared::models::{OrderCreateRequest, OrderItem, User};
use shared::order::OrderStatus;
use shared::util::parse_date;

use super::error::OrderError;
use super::store::NewOrder;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Money and weights are stored with 2 decimal places
const DECIMAL_PLACES: u32 = 2;

/// Largest accepted monetary value
pub const MAX_MONEY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Largest accepted weight in kilos for a single order
pub const MAX_KILO: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

const DEFAULT_PAYMENT_METHOD: &str = "Cash on Delivery";

/// Validated create request, before the customer snapshot is attached
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub shop_id: i64,
    pub service_name: String,
    pub items: Vec<OrderItem>,
    pub kilo_amount: Decimal,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub voucher_discount: Decimal,
    /// Recomputed as `subtotal + delivery_fee - voucher_discount`
    pub total_amount: Decimal,
    pub delivery_type: String,
    pub zone: String,
    pub street: String,
    pub barangay: String,
    pub building: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub payment_method: String,
    pub notes: Option<String>,
}

impl OrderDraft {
    pub fn parse(req: &OrderCreateRequest) -> Result<Self, OrderError> {
        let shop_id = parse_id("shop_id", req.shop_id.as_ref())?;
        let service_name = required_text("service_name", req.service_name.as_deref())?;

        let subtotal = non_negative("subtotal", parse_money("subtotal", req.subtotal.as_ref())?)?;
        let delivery_fee = non_negative(
            "delivery_fee",
            parse_money("delivery_fee", req.delivery_fee.as_ref())?,
        )?;
        let voucher_discount = non_negative(
            "voucher_discount",
            parse_money("voucher_discount", req.voucher_discount.as_ref())?,
        )?;
        let claimed_total = parse_money("total_amount", req.total_amount.as_ref())?;
        let total_amount = checked_total(subtotal, delivery_fee, voucher_discount, claimed_total)?;

        let kilo_amount = match req.kilo_amount.as_ref() {
            None | Some(Value::Null) => Decimal::ZERO,
            Some(v) => non_negative(
                "kilo_amount",
                parse_bounded("kilo_amount", Some(v), MAX_KILO)?,
            )?,
        };

        let scheduled_date = required_text("scheduled_date", req.scheduled_date.as_deref())?;
        let Some(date) = parse_date(&scheduled_date) else {
            return Err(OrderError::validation(
                "scheduled_date",
                format!("Invalid scheduled_date: {scheduled_date}"),
            ));
        };

        for item in &req.items {
            if item.quantity <= 0 {
                return Err(OrderError::validation(
                    "items",
                    format!("quantity must be positive for {}", item.item_name),
                ));
            }
        }

        Ok(Self {
            shop_id,
            service_name,
            items: req.items.clone(),
            kilo_amount,
            subtotal,
            delivery_fee,
            voucher_discount,
            total_amount,
            delivery_type: required_text("delivery_type", req.delivery_type.as_deref())?,
            zone: required_text("zone", req.zone.as_deref())?,
            street: required_text("street", req.street.as_deref())?,
            barangay: required_text("barangay", req.barangay.as_deref())?,
            building: required_text("building", req.building.as_deref())?,
            scheduled_date: date.format("%Y-%m-%d").to_string(),
            scheduled_time: required_text("scheduled_time", req.scheduled_time.as_deref())?,
            payment_method: optional_text(req.payment_method.as_deref())
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            notes: optional_text(req.notes.as_deref()),
        })
    }

    /// Attach the customer snapshot taken at creation time
    pub fn into_new_order(self, user: &User) -> NewOrder {
        NewOrder {
            user_id: user.id,
            shop_id: self.shop_id,
            user_name: user.name.clone(),
            user_email: user.email.clone(),
            user_phone: user.phone.clone(),
            service_name: self.service_name,
            items: self.items,
            kilo_amount: self.kilo_amount,
            subtotal: self.subtotal,
            delivery_fee: self.delivery_fee,
            voucher_discount: self.voucher_discount,
            total_amount: self.total_amount,
            delivery_type: self.delivery_type,
            zone: self.zone,
            street: self.street,
            barangay: self.barangay,
            building: self.building,
            scheduled_date: self.scheduled_date,
            scheduled_time: self.scheduled_time,
            payment_method: self.payment_method,
            notes: self.notes,
        }
    }
}

/// Total must equal `subtotal + delivery_fee - voucher_discount` within 0.01.
/// Returns the computed value, which is what gets stored.
pub fn checked_total(
    subtotal: Decimal,
    delivery_fee: Decimal,
    voucher_discount: Decimal,
    claimed: Decimal,
) -> Result<Decimal, OrderError> {
    let computed = subtotal + delivery_fee - voucher_discount;
    if computed < Decimal::ZERO {
        return Err(OrderError::validation(
            "voucher_discount",
            "voucher_discount exceeds subtotal plus delivery_fee",
        ));
    }
    if (computed - claimed).abs() > MONEY_TOLERANCE {
        return Err(OrderError::validation(
            "total_amount",
            format!(
                "total_amount {claimed} does not match subtotal + delivery_fee - voucher_discount = {computed}"
            ),
        ));
    }
    Ok(computed.round_dp(2))
}

/// Price-per-kilo from a set-price request
pub fn parse_price_per_kilo(value: Option<&Value>) -> Result<Decimal, OrderError> {
    let price = parse_money("price_per_kilo", value)?;
    non_negative("price_per_kilo", price)
}

/// Status named by a status-update request
pub fn parse_status(value: &str) -> Result<OrderStatus, OrderError> {
    value
        .parse()
        .map_err(|_| OrderError::validation("status", format!("Unknown status: {value}")))
}

/// Stored note for a cancellation: `Cancelled - {reason}: {notes}` or
/// `Cancelled - {reason}` when no notes are given
pub fn cancel_note(reason: Option<&str>, notes: Option<&str>) -> Result<String, OrderError> {
    let reason = required_text("reason", reason)?;
    Ok(match optional_text(notes) {
        Some(notes) => format!("Cancelled - {reason}: {notes}"),
        None => format!("Cancelled - {reason}"),
    })
}

fn parse_money(field: &'static str, value: Option<&Value>) -> Result<Decimal, OrderError> {
    parse_bounded(field, value, MAX_MONEY)
}

/// Parse, round half away from zero to 2 places, then cap at `max`
fn parse_bounded(
    field: &'static str,
    value: Option<&Value>,
    max: Decimal,
) -> Result<Decimal, OrderError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(OrderError::missing(field)),
        Some(Value::Number(n)) => decimal_from_str(&n.to_string()),
        Some(Value::String(s)) => decimal_from_str(s.trim()),
        Some(_) => None,
    };
    let raw =
        parsed.ok_or_else(|| OrderError::validation(field, format!("{field} must be a number")))?;
    let rounded =
        raw.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() > max {
        return Err(OrderError::validation(
            field,
            format!("{field} exceeds maximum allowed ({max}), got {raw}"),
        ));
    }
    Ok(rounded)
}

fn decimal_from_str(s: &str) -> Option<Decimal> {
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

fn parse_id(field: &'static str, value: Option<&Value>) -> Result<i64, OrderError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(OrderError::missing(field)),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    };
    parsed.ok_or_else(|| OrderError::validation(field, format!("{field} must be an integer")))
}

fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal, OrderError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(OrderError::validation(
            field,
            format!("{field} must be non-negative, got {value}"),
        ));
    }
    Ok(value)
}

fn required_text(field: &'static str, value: Option<&str>) -> Result<String, OrderError> {
    optional_text(value).ok_or_else(|| OrderError::missing(field))
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
