use crate::common::{
    mock_server::{
        signature::{error_response, validate},
        CardToken, Charge, MockServerConfiguration, MockServerStorage, Payment,
    },
    MOCK_OTP, PENDING_CHARGE_AMOUNT,
};
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use bri_rust::apis::direct_debit::{
    CardTokenOtpRequest, CardTokenOtpVerifyRequest, ChargeDetailRequest,
    DeleteCardTokenRequest, PaymentChargeOtpRequest, PaymentChargeOtpVerifyRequest,
    RefundRequest,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

/// Validates the signature, then decodes the body as `T`.
fn authorize<T: DeserializeOwned>(
    req: &HttpRequest,
    body: &web::Bytes,
    configuration: &MockServerConfiguration,
) -> Result<T, HttpResponse> {
    validate(req, body, configuration)?;

    serde_json::from_slice(body)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, "0400", &e.to_string()))
}

fn bad_request(code: &str, desc: &str) -> HttpResponse {
    error_response(StatusCode::BAD_REQUEST, code, desc)
}

fn status(payment: &Payment) -> &'static str {
    if payment.refunded {
        "refunded"
    } else {
        "success"
    }
}

fn last4(card_pan: &str) -> &str {
    &card_pan[card_pan.len().saturating_sub(4)..]
}

/// POST /tokens
pub(super) async fn create_card_token(
    req: HttpRequest,
    body: web::Bytes,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
) -> HttpResponse {
    let request: CardTokenOtpRequest = match authorize(&req, &body, &configuration) {
        Ok(request) => request,
        Err(res) => return res,
    };
    let body = request.body;

    if body.otp_bri_status != "YES" {
        return bad_request("0101", "otpBriStatus must be YES");
    }
    if body.card_pan.len() < 12 || !body.card_pan.chars().all(|c| c.is_ascii_digit()) {
        return bad_request("0102", "invalid card pan");
    }

    let card_token = format!("card_{}", Uuid::new_v4().simple());
    storage.write().unwrap().card_tokens.insert(
        card_token.clone(),
        CardToken {
            card_pan: body.card_pan,
            verified: false,
        },
    );

    HttpResponse::Ok().json(json!({
        "status": "success",
        "cardToken": card_token,
        "phoneNumber": body.phone_number
    }))
}

/// PATCH /tokens
pub(super) async fn verify_card_token(
    req: HttpRequest,
    body: web::Bytes,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
) -> HttpResponse {
    let request: CardTokenOtpVerifyRequest = match authorize(&req, &body, &configuration) {
        Ok(request) => request,
        Err(res) => return res,
    };
    let body = request.body;

    let mut storage = storage.write().unwrap();
    let card = match storage.card_tokens.get_mut(&body.card_token) {
        Some(card) => card,
        None => return bad_request("0103", "card token not found"),
    };
    if body.passcode != MOCK_OTP {
        return bad_request("0104", "invalid otp");
    }
    card.verified = true;

    HttpResponse::Ok().json(json!({
        "cardToken": body.card_token,
        "status": "active",
        "last4": last4(&card.card_pan),
        "expiredDate": "1230"
    }))
}

/// DELETE /tokens
pub(super) async fn delete_card_token(
    req: HttpRequest,
    body: web::Bytes,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
) -> HttpResponse {
    let request: DeleteCardTokenRequest = match authorize(&req, &body, &configuration) {
        Ok(request) => request,
        Err(res) => return res,
    };

    match storage
        .write()
        .unwrap()
        .card_tokens
        .remove(&request.body.card_token)
    {
        Some(_) => HttpResponse::Ok().json(json!({ "status": "deleted" })),
        None => bad_request("0103", "card token not found"),
    }
}

/// POST /charges
pub(super) async fn create_charge(
    req: HttpRequest,
    body: web::Bytes,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
) -> HttpResponse {
    let request: PaymentChargeOtpRequest = match authorize(&req, &body, &configuration) {
        Ok(request) => request,
        Err(res) => return res,
    };
    let body = request.body;

    let mut storage = storage.write().unwrap();
    match storage.card_tokens.get(&body.card_token) {
        Some(card) if card.verified => {}
        Some(_) => return bad_request("0105", "card token not verified"),
        None => return bad_request("0103", "card token not found"),
    }
    if body.amount.parse::<f64>().map_or(true, |amount| amount <= 0.0) {
        return bad_request("0106", "invalid amount");
    }

    let charge_token = format!("charge_{}", Uuid::new_v4().simple());
    storage.charges.insert(
        charge_token.clone(),
        Charge {
            card_token: body.card_token,
            amount: body.amount,
            currency: body.currency,
            remarks: body.remarks.clone(),
        },
    );

    HttpResponse::Ok().json(json!({
        "chargeToken": charge_token,
        "status": "pending",
        "remarks": body.remarks
    }))
}

/// POST /charges/verify
pub(super) async fn verify_charge(
    req: HttpRequest,
    body: web::Bytes,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
) -> HttpResponse {
    let request: PaymentChargeOtpVerifyRequest = match authorize(&req, &body, &configuration) {
        Ok(request) => request,
        Err(res) => return res,
    };
    let body = request.body;

    let mut storage = storage.write().unwrap();
    if body.passcode != MOCK_OTP {
        return bad_request("0104", "invalid otp");
    }
    let charge = match storage.charges.remove(&body.charge_token) {
        Some(charge) => charge,
        None => return bad_request("0107", "charge token not found"),
    };

    // The bank has not settled this one yet
    if charge.amount == PENDING_CHARGE_AMOUNT {
        return HttpResponse::Ok().json(json!({ "pendingFlag": true }));
    }

    let payment_id = Uuid::new_v4().to_string();
    let res = json!({
        "paymentId": payment_id,
        "status": "success",
        "amount": charge.amount,
        "currency": charge.currency,
        "remarks": charge.remarks
    });
    storage.payments.insert(
        payment_id,
        Payment {
            card_token: charge.card_token,
            amount: charge.amount,
            currency: charge.currency,
            remarks: charge.remarks,
            refunded: false,
        },
    );

    HttpResponse::Ok().json(res)
}

/// POST /charges/inquiry
pub(super) async fn charge_inquiry(
    req: HttpRequest,
    body: web::Bytes,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
) -> HttpResponse {
    let request: ChargeDetailRequest = match authorize(&req, &body, &configuration) {
        Ok(request) => request,
        Err(res) => return res,
    };
    let payment_id = request.body.payment_id;

    match storage.read().unwrap().payments.get(&payment_id) {
        Some(payment) => HttpResponse::Ok().json(json!({
            "paymentId": payment_id,
            "status": status(payment),
            "amount": payment.amount,
            "currency": payment.currency,
            "remarks": payment.remarks,
            "createdAt": Utc::now().to_rfc3339(),
            "cardToken": payment.card_token
        })),
        None => bad_request("0108", "payment not found"),
    }
}

/// POST /refunds
pub(super) async fn create_refund(
    req: HttpRequest,
    body: web::Bytes,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
) -> HttpResponse {
    let request: RefundRequest = match authorize(&req, &body, &configuration) {
        Ok(request) => request,
        Err(res) => return res,
    };
    let body = request.body;

    let mut storage = storage.write().unwrap();
    let payment = match storage.payments.get_mut(&body.payment_id) {
        Some(payment) if payment.card_token == body.card_token => payment,
        _ => return bad_request("0108", "payment not found"),
    };
    if payment.refunded {
        return bad_request("0109", "payment already refunded");
    }

    let requested = body.amount.parse::<f64>().unwrap_or(f64::NAN);
    let charged = payment.amount.parse::<f64>().unwrap_or(0.0);
    if !(requested > 0.0 && requested <= charged) || body.currency != payment.currency {
        return bad_request("0110", "invalid refund amount");
    }
    payment.refunded = true;

    HttpResponse::Ok().json(json!({
        "refundId": Uuid::new_v4().to_string(),
        "status": "success",
        "paymentId": body.payment_id,
        "amount": body.amount,
        "currency": body.currency
    }))
}
