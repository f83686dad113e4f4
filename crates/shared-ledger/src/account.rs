//! Account funding and contract deployment.

use crate::errors::LedgerError;
use crate::ports::LedgerClient;
use crate::signer::sign_and_send;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{Actor, Address, ContractKind, Receipt, TransactionRequest, TRANSFER_GAS, U256};
use std::sync::Arc;
use tracing::info;

/// Transfer `amount` from `funder` to `recipient` and check the new balance.
///
/// The recipient is expected to be a fresh account: its balance after the
/// transfer must equal `amount` exactly.
pub async fn fund_account(
    client: &Arc<dyn LedgerClient>,
    funder_key: &Secp256k1KeyPair,
    funder: &mut Actor,
    recipient: Address,
    amount: U256,
) -> Result<Receipt, LedgerError> {
    let receipt = sign_and_send(
        client,
        funder_key,
        funder,
        TransactionRequest::transfer(recipient, amount).with_gas(TRANSFER_GAS),
        Vec::new(),
    )
    .await?
    .wait()
    .await?;

    if !receipt.is_success() {
        return Err(LedgerError::Reverted {
            tx_hash: receipt.tx_hash,
        });
    }

    let balance = client.balance_at(recipient, None).await?;
    if balance != amount {
        return Err(LedgerError::FundingMismatch {
            account: recipient,
            expected: amount,
            actual: balance,
        });
    }

    info!(account = %hex::encode(recipient), amount = %amount, "Account funded");
    Ok(receipt)
}

/// Deploy a `kind` contract and return its address.
pub async fn deploy_contract(
    client: &Arc<dyn LedgerClient>,
    key: &Secp256k1KeyPair,
    actor: &mut Actor,
    kind: ContractKind,
) -> Result<Address, LedgerError> {
    let code = kind.creation_code()?;
    let receipt = sign_and_send(client, key, actor, TransactionRequest::deploy(code), Vec::new())
        .await?
        .wait()
        .await?;

    if !receipt.is_success() {
        return Err(LedgerError::Reverted {
            tx_hash: receipt.tx_hash,
        });
    }
    let address = receipt
        .contract_address
        .ok_or(LedgerError::MissingContractAddress {
            tx_hash: receipt.tx_hash,
        })?;

    info!(contract = ?kind, address = %hex::encode(address), "Contract deployed");
    Ok(address)
}
