//! Paths of the Direct Debit endpoints.
//!
//! BRI serves sandbox and production under different path prefixes. A client picks one
//! complete table when it is built and never changes it afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical Direct Debit operation, used to look up its path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum EndpointTag {
    #[serde(rename = "createCardTokenOTP")]
    CreateCardTokenOtp,
    #[serde(rename = "createCardTokenOTPVerify")]
    CreateCardTokenOtpVerify,
    DeleteCardToken,
    #[serde(rename = "createPaymentChargeOTP")]
    CreatePaymentChargeOtp,
    #[serde(rename = "createPaymentChargeOTPVerify")]
    CreatePaymentChargeOtpVerify,
    ChargeDetail,
    RefundDirectDebit,
}

impl EndpointTag {
    pub const ALL: [EndpointTag; 7] = [
        EndpointTag::CreateCardTokenOtp,
        EndpointTag::CreateCardTokenOtpVerify,
        EndpointTag::DeleteCardToken,
        EndpointTag::CreatePaymentChargeOtp,
        EndpointTag::CreatePaymentChargeOtpVerify,
        EndpointTag::ChargeDetail,
        EndpointTag::RefundDirectDebit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointTag::CreateCardTokenOtp => "createCardTokenOTP",
            EndpointTag::CreateCardTokenOtpVerify => "createCardTokenOTPVerify",
            EndpointTag::DeleteCardToken => "deleteCardToken",
            EndpointTag::CreatePaymentChargeOtp => "createPaymentChargeOTP",
            EndpointTag::CreatePaymentChargeOtpVerify => "createPaymentChargeOTPVerify",
            EndpointTag::ChargeDetail => "chargeDetail",
            EndpointTag::RefundDirectDebit => "refundDirectDebit",
        }
    }
}

impl fmt::Display for EndpointTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One complete set of Direct Debit paths.
///
/// Card token create, verify and delete share the same path and are told apart by
/// HTTP method (`POST`, `PATCH` and `DELETE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub create_card_token_otp: &'static str,
    pub create_card_token_otp_verify: &'static str,
    pub delete_card_token: &'static str,
    pub create_payment_charge_otp: &'static str,
    pub create_payment_charge_otp_verify: &'static str,
    pub charge_detail: &'static str,
    pub refund_direct_debit: &'static str,
}

impl Endpoints {
    pub const SANDBOX_PREFIX: &'static str = "/sandbox/v1/directdebit/";
    pub const PRODUCTION_PREFIX: &'static str = "/v1/rt-directdebit/";

    pub const SANDBOX: Endpoints = Endpoints {
        create_card_token_otp: "/sandbox/v1/directdebit/tokens",
        create_card_token_otp_verify: "/sandbox/v1/directdebit/tokens",
        delete_card_token: "/sandbox/v1/directdebit/tokens",
        create_payment_charge_otp: "/sandbox/v1/directdebit/charges",
        create_payment_charge_otp_verify: "/sandbox/v1/directdebit/charges/verify",
        charge_detail: "/sandbox/v1/directdebit/charges/inquiry",
        refund_direct_debit: "/sandbox/v1/directdebit/refunds",
    };

    // Production paths use the "rt-" prefix
    pub const PRODUCTION: Endpoints = Endpoints {
        create_card_token_otp: "/v1/rt-directdebit/tokens",
        create_card_token_otp_verify: "/v1/rt-directdebit/tokens",
        delete_card_token: "/v1/rt-directdebit/tokens",
        create_payment_charge_otp: "/v1/rt-directdebit/charges",
        create_payment_charge_otp_verify: "/v1/rt-directdebit/charges/verify",
        charge_detail: "/v1/rt-directdebit/charges/inquiry",
        refund_direct_debit: "/v1/rt-directdebit/refunds",
    };

    /// Selects the whole sandbox table when `use_sandbox_prefix` is true, the whole
    /// production table otherwise.
    pub fn select(use_sandbox_prefix: bool) -> Self {
        if use_sandbox_prefix {
            Self::SANDBOX
        } else {
            Self::PRODUCTION
        }
    }

    pub fn path(&self, tag: EndpointTag) -> &'static str {
        match tag {
            EndpointTag::CreateCardTokenOtp => self.create_card_token_otp,
            EndpointTag::CreateCardTokenOtpVerify => self.create_card_token_otp_verify,
            EndpointTag::DeleteCardToken => self.delete_card_token,
            EndpointTag::CreatePaymentChargeOtp => self.create_payment_charge_otp,
            EndpointTag::CreatePaymentChargeOtpVerify => self.create_payment_charge_otp_verify,
            EndpointTag::ChargeDetail => self.charge_detail,
            EndpointTag::RefundDirectDebit => self.refund_direct_debit,
        }
    }

    pub fn is_sandbox(&self) -> bool {
        *self == Self::SANDBOX
    }
}
