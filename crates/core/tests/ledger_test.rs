use pretty_assertions::assert_eq;
use rstest::rstest;
use courtside_core::{
    ledger::{BalancePreview, format_money, net_change, signed_amount},
    models::{
        transaction::{Transaction, TransactionType},
        user::{Role, User},
    },
};

fn client(balance: Option<f64>) -> User {
    User {
        id: 2,
        first_name: "Ana".to_string(),
        last_name: "Ivanovic".to_string(),
        email: "ana@example.com".to_string(),
        phone: None,
        balance,
        role: Role::User,
        created_at: None,
    }
}

#[rstest]
#[case(0.0, "$0.00")]
#[case(5.5, "$5.50")]
#[case(999_999.99, "$999,999.99")]
#[case(1234.567, "$1,234.57")]
#[case(-42.0, "-$42.00")]
fn test_format_money(#[case] amount: f64, #[case] expected: &str) {
    assert_eq!(format_money(amount), expected);
}

#[test]
fn test_signed_amount() {
    assert_eq!(signed_amount(TransactionType::Add, 20.0), "+$20.00");
    assert_eq!(signed_amount(TransactionType::Subtract, 20.0), "-$20.00");
}

#[test]
fn test_preview_add() {
    let preview = BalancePreview::for_user(&client(Some(100.0)), TransactionType::Add, 25.0);

    assert_eq!(preview.current, 100.0);
    assert_eq!(preview.resulting, 125.0);
    assert!(!preview.goes_negative());
}

#[test]
fn test_preview_subtract_missing_balance_counts_as_zero() {
    let preview = BalancePreview::for_user(&client(None), TransactionType::Subtract, 30.0);

    assert_eq!(preview.current, 0.0);
    assert_eq!(preview.resulting, -30.0);
    assert!(preview.goes_negative());
}

#[test]
fn test_net_change_over_history() {
    let tx = |id, kind, amount| Transaction {
        id,
        user_id: 2,
        amount,
        transaction_type: kind,
        description: "Lesson".to_string(),
        created_at: None,
        user_name: None,
    };
    let history = vec![
        tx(1, TransactionType::Add, 100.0),
        tx(2, TransactionType::Subtract, 40.0),
        tx(3, TransactionType::Subtract, 10.0),
    ];

    assert_eq!(net_change(&history), 50.0);
}
