//! Electronic invoicing client (WSFEv1).
//!
//! Covers voucher authorization (CAE), the CAEA bulk-authorization
//! workflow, voucher lookup, and the service's reference-data tables.
//!
//! # Example
//!
//! ```ignore
//! use afip_ws::wsfe::{VatRate, VoucherRequest, WsfeClient};
//! use rust_decimal_macros::dec;
//!
//! let client = WsfeClient::new(20111111112, transport, delegate);
//!
//! let data = VoucherRequest {
//!     sales_point: 1,
//!     voucher_type: 6,
//!     document_type: 99,
//!     total_amount: dec!(121.00),
//!     net_amount: dec!(100.00),
//!     vat_amount: dec!(21.00),
//!     vat_rates: Some(vec![VatRate { id: 5, base_amount: dec!(100.00), amount: dec!(21.00) }]),
//!     ..Default::default()
//! };
//!
//! let next = client.create_next_voucher(&data, None).await?;
//! println!("voucher {} authorized, CAE {}", next.voucher_number, next.voucher.cae);
//! ```

mod client;
mod types;

pub use client::{WSFE_SERVICE, WsfeClient};
pub use types::{
    AssociatedVoucher, Buyer, CreatedVoucher, NextVoucher, OptionalField, Tax, VatRate,
    VoucherRequest,
};
