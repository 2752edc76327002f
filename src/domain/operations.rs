use super::account::Account;
use super::amount::Amount;
use super::error::DomainError;

/// Debit an account, refusing to take its balance below zero
pub fn apply_debit(account: &mut Account, amount: &Amount) -> Result<(), DomainError> {
    // Validate amount is positive
    if !amount.is_positive() {
        return Err(DomainError::NonPositiveAmount);
    }

    let projected = account.balance() - amount;
    if projected.is_negative() {
        return Err(DomainError::InsufficientBalance);
    }

    account.set_balance(projected);
    Ok(())
}

/// Credit an account
pub fn apply_credit(account: &mut Account, amount: &Amount) -> Result<(), DomainError> {
    if !amount.is_positive() {
        return Err(DomainError::NonPositiveAmount);
    }

    let credited = account.balance() + amount;
    account.set_balance(credited);
    Ok(())
}
