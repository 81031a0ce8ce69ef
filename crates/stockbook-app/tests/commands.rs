//! End-to-end command flows against the shared state.

use stockbook_app::commands::dashboard::dashboard;
use stockbook_app::commands::expense::{record_expense, ExpenseForm};
use stockbook_app::commands::product::{
    add_product, delete_product, get_product, list_products, update_product, ProductForm,
    ProductPatchForm,
};
use stockbook_app::commands::sale::{list_sales, record_sale, sales_by_period, SaleForm};
use stockbook_app::error::ErrorCode;
use stockbook_app::state::{AppConfig, InventoryState};
use stockbook_app::bootstrap;

fn product_form(name: &str, buy_price: &str, quantity: &str) -> ProductForm {
    ProductForm {
        name: name.to_string(),
        category: "General".to_string(),
        buy_price: buy_price.to_string(),
        quantity: quantity.to_string(),
        description: None,
    }
}

fn sale_form(product_id: &str, quantity: i64, price: &str) -> SaleForm {
    SaleForm {
        product_id: product_id.to_string(),
        quantity: quantity.to_string(),
        sale_price: price.to_string(),
    }
}

#[test]
fn test_shop_day() {
    let config = AppConfig::default();
    let inventory = bootstrap(&config).unwrap();

    let widget = add_product(&inventory, product_form("Widget", "10.00", "5")).unwrap();
    let gadget = add_product(&inventory, product_form("Gadget", "2.50", "40")).unwrap();
    assert_ne!(widget.id, gadget.id);

    record_sale(&inventory, sale_form(&widget.id, 2, "15.00")).unwrap();
    record_sale(&inventory, sale_form(&gadget.id, 4, "4.00")).unwrap();

    let err = record_sale(&inventory, sale_form(&widget.id, 10, "15.00")).unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientStock);

    record_expense(
        &inventory,
        ExpenseForm {
            description: "Cleaning".to_string(),
            amount: "30".to_string(),
            category: "supplies".to_string(),
        },
    )
    .unwrap();

    let view = dashboard(&inventory, &config);
    assert_eq!(view.metrics.total_stock, 3 + 36);
    assert_eq!(view.metrics.stock_value.cents(), 3 * 1000 + 36 * 250);
    assert_eq!(view.metrics.total_sales.cents(), 3000 + 1600);
    assert_eq!(view.metrics.profit.cents(), 1000 + 600);
    assert_eq!(view.total_expenses.cents(), 3000);

    // Only the widget is under 10 units.
    assert_eq!(view.alerts.len(), 1);
    assert_eq!(view.alerts[0].name, "Widget");

    // Raising the cost rewrites the margin on past sales.
    update_product(
        &inventory,
        &widget.id,
        ProductPatchForm {
            buy_price: Some("12".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    let view = dashboard(&inventory, &config);
    assert_eq!(view.metrics.profit.cents(), 600 + 600);

    // Deleting the product drops its margin but keeps its sale.
    delete_product(&inventory, &widget.id).unwrap();
    let view = dashboard(&inventory, &config);
    assert_eq!(view.metrics.profit.cents(), 600);
    assert_eq!(view.metrics.total_sales.cents(), 4600);
    assert_eq!(list_sales(&inventory).len(), 2);
    assert_eq!(sales_by_period(&inventory, "day").unwrap().len(), 2);

    assert_eq!(list_products(&inventory).len(), 1);
    assert_eq!(
        get_product(&inventory, &widget.id).unwrap_err().code,
        ErrorCode::NotFound
    );
}

#[test]
fn test_demo_bootstrap() {
    let config = AppConfig {
        seed_demo_data: true,
        ..AppConfig::default()
    };
    let inventory = bootstrap(&config).unwrap();

    assert!(!list_products(&inventory).is_empty());
    let view = dashboard(&inventory, &config);
    assert!(view.metrics.total_sales.is_positive());

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["period"], "month");
    assert!(json["metrics"]["totalStock"].is_i64());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sales_never_oversell() {
    let inventory = InventoryState::new();
    let product = add_product(&inventory, product_form("Widget", "1", "100")).unwrap();

    let mut handles = Vec::new();
    for _ in 0..200 {
        let inventory = inventory.clone();
        let id = product.id.clone();
        // record_sale blocks on the store lock, so keep it off the async workers.
        handles.push(tokio::task::spawn_blocking(move || {
            record_sale(&inventory, sale_form(&id, 1, "2")).is_ok()
        }));
    }

    let mut sold = 0;
    for handle in handles {
        if handle.await.unwrap() {
            sold += 1;
        }
    }

    assert_eq!(sold, 100);
    assert_eq!(get_product(&inventory, &product.id).unwrap().quantity, 0);
    assert_eq!(list_sales(&inventory).len(), 100);
}
