use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::verification::{
        VerificationContextQuery, VerificationContextResponseDto, VerifyWalletRequestDto,
        VerifyWalletResponseDto,
    },
    server::{
        error::AppError,
        model::verification::{LinkWalletParam, OwnershipProof},
        service::verification::link::WalletLinkService,
        state::AppState,
    },
};

/// Get the context of a pending verification.
///
/// Lets the wallet-connection page show which guild and token threshold a code is for
/// before the user signs anything. The code is not consumed.
///
/// # Arguments
/// - `state` - Application state containing the database and code store
/// - `query` - `code` query parameter
///
/// # Returns
/// - `200 OK` - Context of the pending verification
/// - `400 Bad Request` - `code` missing
/// - `404 Not Found` - Code unknown or expired, or guild configuration missing
/// - `500 Internal Server Error` - Database error
pub async fn get_verification_context(
    State(state): State<AppState>,
    Query(query): Query<VerificationContextQuery>,
) -> Result<impl IntoResponse, AppError> {
    let code = query
        .code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing verification code query parameter.".into()))?;

    let service = WalletLinkService::new(
        &state.db,
        &state.codes,
        &state.reconciler,
        &*state.transactions,
    );
    let context = service.context(code.trim()).await?;

    Ok((
        StatusCode::OK,
        Json(VerificationContextResponseDto {
            success: true,
            message: "Verification context retrieved successfully.".to_string(),
            context: context.into_dto(),
        }),
    ))
}

/// Link a signed wallet to the Discord user behind a verification code.
///
/// Consumes the code, checks the ownership proof, stores the wallet and converges the
/// gated role immediately. Wallets that cannot sign messages set `isLedgerFlow` and submit
/// the signature of a memo transaction naming the code.
///
/// # Arguments
/// - `state` - Application state containing the database, code store and reconciler
/// - `payload` - Code, wallet address, signature, the signed message and the Ledger flag
///
/// # Returns
/// - `200 OK` - Wallet linked and the holder meets the threshold
/// - `400 Bad Request` - Missing fields, malformed address or signature, or wallet linked
///   but the threshold is not met
/// - `401 Unauthorized` - Signature, message or memo transaction does not prove ownership
/// - `404 Not Found` - Code unknown or expired, configuration missing, or member left
/// - `500 Internal Server Error` - Database error or invalid stored configuration
pub async fn verify_wallet(
    State(state): State<AppState>,
    Json(payload): Json<VerifyWalletRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let param = into_link_param(payload)?;

    let service = WalletLinkService::new(
        &state.db,
        &state.codes,
        &state.reconciler,
        &*state.transactions,
    );
    let outcome = service.link_wallet(param).await?;

    let status = if outcome.eligible {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    Ok((
        status,
        Json(VerifyWalletResponseDto {
            success: outcome.eligible,
            message: outcome.message,
        }),
    ))
}

fn into_link_param(payload: VerifyWalletRequestDto) -> Result<LinkWalletParam, AppError> {
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    match (
        present(payload.verification_code),
        present(payload.wallet_address),
        present(payload.signature),
        present(payload.message),
    ) {
        (Some(code), Some(wallet_address), Some(signature), Some(message)) => {
            let proof = if payload.is_ledger_flow {
                OwnershipProof::MemoTransaction { signature }
            } else {
                OwnershipProof::SignedMessage { signature, message }
            };

            Ok(LinkWalletParam {
                code: code.trim().to_string(),
                wallet_address,
                proof,
            })
        }
        _ => Err(AppError::BadRequest(
            "Missing required fields (verificationCode, walletAddress, signature, message)."
                .to_string(),
        )),
    }
}
