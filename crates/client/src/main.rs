//! `foodnova` command-line client.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use foodnova_cart::CartKey;
use foodnova_catalog::{PackDraft, PackPatch, ProductDraft, ProductPatch, VariantDraft, VariantItemDraft, VariantPatch};
use foodnova_client::screens::{
    AdminOrdersScreen, BrowseScreen, CatalogAdmin, CheckoutScreen, DashboardScreen, OrderReviewer,
    OrderViewer,
};
use foodnova_client::{AppContext, ClientConfig};
use foodnova_core::{
    CategoryId, Money, OrderId, PackId, PackVariantId, ProductId, VariantItemId,
};
use foodnova_orders::{
    CheckoutForm, CustomerAction, DeliveryMode, Order, OrderFilter, OrderStatus, PaymentMethod,
    PaymentStatus, ReviewDecision,
};

#[tokio::main]
async fn main() -> Result<()> {
    foodnova_observability::init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let mut ctx = AppContext::init(&config)
        .await
        .context("failed to initialise local state")?;

    match cli.command {
        Commands::Auth(command) => handle_auth(&mut ctx, command, cli.json).await?,
        Commands::Browse(args) => handle_browse(&ctx, args, cli.json).await?,
        Commands::Pack(command) => handle_pack(&ctx, command, cli.json).await?,
        Commands::Cart(command) => handle_cart(&mut ctx, command, cli.json).await?,
        Commands::Checkout(args) => handle_checkout(&mut ctx, args, cli.json).await?,
        Commands::Orders(command) => handle_orders(&ctx, command, cli.json).await?,
        Commands::Admin(command) => handle_admin(&ctx, command, cli.json).await?,
        Commands::Prefs(command) => handle_prefs(&mut ctx, command, cli.json).await?,
    }

    ctx.close().await;
    Ok(())
}

#[derive(Parser)]
#[command(name = "foodnova", about = "Grocery storefront and admin client", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Auth(AuthCommands),
    /// List categories, products and packs.
    Browse(BrowseArgs),
    #[command(subcommand)]
    Pack(PackCommands),
    #[command(subcommand)]
    Cart(CartCommands),
    /// Place an order from the current cart.
    Checkout(CheckoutArgs),
    #[command(subcommand)]
    Orders(OrdersCommands),
    #[command(subcommand)]
    Admin(AdminCommands),
    #[command(subcommand)]
    Prefs(PrefsCommands),
}

#[derive(Subcommand)]
enum AuthCommands {
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
}

#[derive(Args)]
struct BrowseArgs {
    #[arg(long, help = "Only show products in this category")]
    category: Option<i64>,
}

#[derive(Subcommand)]
enum PackCommands {
    Show { id: i64 },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct LineTarget {
    #[arg(long, help = "Product id")]
    product: Option<i64>,
    #[arg(long, help = "Pack variant id")]
    variant: Option<i64>,
}

impl LineTarget {
    fn key(&self) -> Result<CartKey> {
        match (self.product, self.variant) {
            (Some(id), None) => Ok(CartKey::Product(ProductId::new(id))),
            (None, Some(id)) => Ok(CartKey::PackVariant(PackVariantId::new(id))),
            _ => Err(anyhow!("pass exactly one of --product or --variant")),
        }
    }
}

#[derive(Subcommand)]
enum CartCommands {
    Show,
    Add {
        #[command(flatten)]
        target: LineTarget,
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    /// Set a line's quantity; 0 removes it.
    Set {
        #[command(flatten)]
        target: LineTarget,
        qty: u32,
    },
    Remove {
        #[command(flatten)]
        target: LineTarget,
    },
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaymentChoice {
    Etransfer,
    Bank,
}

impl From<PaymentChoice> for PaymentMethod {
    fn from(choice: PaymentChoice) -> Self {
        match choice {
            PaymentChoice::Etransfer => PaymentMethod::Etransfer,
            PaymentChoice::Bank => PaymentMethod::Bank,
        }
    }
}

#[derive(Args)]
struct CheckoutArgs {
    #[arg(long, action = ArgAction::SetTrue, help = "Pick up from the store instead of delivery")]
    pickup: bool,
    #[arg(long, default_value = "", help = "Delivery address, or a note for pickup")]
    address: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, value_enum, default_value = "etransfer")]
    payment: PaymentChoice,
}

#[derive(Subcommand)]
enum OrdersCommands {
    List,
    Show { id: i64 },
    UploadReceipt { id: i64, path: PathBuf },
    Receipt { id: i64 },
}

#[derive(Subcommand)]
enum AdminCommands {
    Dashboard,
    #[command(subcommand)]
    Orders(AdminOrdersCommands),
    #[command(subcommand)]
    Payments(PaymentsCommands),
    #[command(subcommand)]
    Products(ProductsCommands),
    #[command(subcommand)]
    Categories(CategoriesCommands),
    #[command(subcommand)]
    Packs(PacksCommands),
}

fn parse_order_status(raw: &str) -> Result<OrderStatus, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

#[derive(Subcommand)]
enum AdminOrdersCommands {
    List {
        #[arg(long, value_parser = parse_order_status)]
        status: Option<OrderStatus>,
        #[arg(long, default_value = "", help = "Order number substring")]
        search: String,
    },
    Show { id: i64 },
    SetStatus {
        id: i64,
        #[arg(value_parser = parse_order_status)]
        status: OrderStatus,
    },
    ReviewReceipt {
        id: i64,
        #[arg(long, value_enum)]
        decision: DecisionChoice,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DecisionChoice {
    Approve,
    Reject,
}

impl From<DecisionChoice> for ReviewDecision {
    fn from(choice: DecisionChoice) -> Self {
        match choice {
            DecisionChoice::Approve => ReviewDecision::Approved,
            DecisionChoice::Reject => ReviewDecision::Rejected,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PaymentStatusChoice {
    Pending,
    Verified,
    Failed,
}

impl From<PaymentStatusChoice> for PaymentStatus {
    fn from(choice: PaymentStatusChoice) -> Self {
        match choice {
            PaymentStatusChoice::Pending => PaymentStatus::Pending,
            PaymentStatusChoice::Verified => PaymentStatus::Verified,
            PaymentStatusChoice::Failed => PaymentStatus::Failed,
        }
    }
}

#[derive(Subcommand)]
enum PaymentsCommands {
    /// Update the payment attached to an order.
    Update {
        order_id: i64,
        #[arg(long, value_enum)]
        status: PaymentStatusChoice,
        #[arg(long)]
        reference: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProductsCommands {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: u64,
        #[arg(long, default_value_t = 0)]
        stock: i64,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        category: Option<i64>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<u64>,
        #[arg(long)]
        stock: Option<i64>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum CategoriesCommands {
    List,
    Create { name: String },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum PacksCommands {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete { id: i64 },
    AddVariant {
        pack_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: u64,
    },
    UpdateVariant {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<u64>,
    },
    DeleteVariant { id: i64 },
    AddItem {
        variant_id: i64,
        #[arg(long)]
        product: i64,
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    DeleteItem { id: i64 },
}

#[derive(Subcommand)]
enum PrefsCommands {
    Theme,
    ToggleTheme,
    DismissInstallPrompt,
}

async fn handle_auth(ctx: &mut AppContext, command: AuthCommands, json: bool) -> Result<()> {
    match command {
        AuthCommands::Register {
            email,
            password,
            full_name,
        } => {
            let profile = ctx.register(&email, &password, &full_name).await?;
            if json {
                print_json(&profile)?;
            } else {
                println!("Registered and signed in as {} ({})", profile.full_name, profile.email);
            }
        }
        AuthCommands::Login { email, password } => {
            let profile = ctx.login(&email, &password).await?;
            if json {
                print_json(&profile)?;
            } else {
                println!("Signed in as {} ({}, {})", profile.full_name, profile.email, profile.role);
            }
        }
        AuthCommands::Logout => {
            ctx.logout().await?;
            if !json {
                println!("Signed out");
            }
        }
        AuthCommands::Whoami => {
            let profile = ctx.whoami().await?;
            if json {
                print_json(&profile)?;
            } else {
                println!("{} <{}> role={}", profile.full_name, profile.email, profile.role);
            }
        }
    }
    Ok(())
}

async fn handle_browse(ctx: &AppContext, args: BrowseArgs, json: bool) -> Result<()> {
    let mut screen = BrowseScreen::new(ctx.api.clone());
    screen.mount().await?;
    screen.select_category(args.category.map(CategoryId::new)).await?;
    let products = screen.visible_products();

    if json {
        return print_json(&serde_json::json!({
            "categories": screen.categories(),
            "products": products,
            "packs": screen.packs(),
        }));
    }

    println!("Categories:");
    for category in screen.categories() {
        println!("  [{}] {}", category.id, category.name);
    }
    println!("Products:");
    for product in &products {
        let stock = if product.stock_qty > 0 { "in stock" } else { "out of stock" };
        println!("  [{}] {} {} ({stock})", product.id, product.name, product.price);
    }
    println!("Packs:");
    for pack in screen.packs() {
        match pack.starting_price() {
            Some(price) => println!("  [{}] {} from {price}", pack.id, pack.name),
            None => println!("  [{}] {}", pack.id, pack.name),
        }
    }
    Ok(())
}

async fn handle_pack(ctx: &AppContext, command: PackCommands, json: bool) -> Result<()> {
    let PackCommands::Show { id } = command;
    let pack = ctx.api.get_pack(PackId::new(id)).await?;
    if json {
        return print_json(&pack);
    }

    println!("{}", pack.name);
    if let Some(description) = &pack.description {
        println!("{description}");
    }
    for variant in &pack.variants {
        println!("  variant [{}] {} {}", variant.id, variant.name, variant.price);
        for item in &variant.items {
            let name = item.product_name.clone().unwrap_or_else(|| format!("product {}", item.product_id));
            println!("    {} x{}", name, item.qty);
        }
    }
    Ok(())
}

async fn handle_cart(ctx: &mut AppContext, command: CartCommands, json: bool) -> Result<()> {
    match command {
        CartCommands::Show => {}
        CartCommands::Add { target, qty } => {
            let key = target.key()?;
            let mut screen = BrowseScreen::new(ctx.api.clone());
            screen.mount().await?;
            match key {
                CartKey::Product(id) => screen.add_product_to_cart(&mut ctx.cart, id, qty).await?,
                CartKey::PackVariant(id) => screen.add_variant_to_cart(&mut ctx.cart, id, qty).await?,
            }
        }
        CartCommands::Set { target, qty } => {
            ctx.cart.set_quantity(&target.key()?, qty).await?;
        }
        CartCommands::Remove { target } => {
            let key = target.key()?;
            if !ctx.cart.remove(&key).await? {
                return Err(anyhow!("{key} is not in the cart"));
            }
        }
        CartCommands::Clear => ctx.cart.clear().await?,
    }

    let cart = ctx.cart.cart();
    if json {
        return print_json(&serde_json::json!({
            "lines": cart.lines(),
            "total_items": cart.total_items(),
            "total_amount": cart.total_amount(),
        }));
    }

    if cart.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }
    for line in cart.lines() {
        println!("  {} x{} @ {} = {}", line.name, line.qty, line.unit_price, line.line_total());
    }
    println!("{} item(s), total {}", cart.total_items(), cart.total_amount());
    Ok(())
}

async fn handle_checkout(ctx: &mut AppContext, args: CheckoutArgs, json: bool) -> Result<()> {
    ctx.require_customer("/checkout")?;

    let form = CheckoutForm {
        mode: if args.pickup {
            DeliveryMode::Pickup
        } else {
            DeliveryMode::Delivery
        },
        address: args.address,
        phone: args.phone,
        payment_method: args.payment.into(),
    };

    let screen = CheckoutScreen::new(ctx.api.clone());
    let outcome = screen.submit(&mut ctx.cart, &form).await?;

    if json {
        return print_json(&outcome.order);
    }
    print_order(&outcome.order);
    if outcome.show_upload_banner {
        println!(
            "Please pay by {} and upload your receipt: foodnova orders upload-receipt {} <file>",
            form.payment_method.label(),
            outcome.order.id
        );
    }
    Ok(())
}

async fn handle_orders(ctx: &AppContext, command: OrdersCommands, json: bool) -> Result<()> {
    ctx.require_customer("/orders")?;

    match command {
        OrdersCommands::List => {
            let orders = ctx.api.my_orders().await?;
            if json {
                return print_json(&orders);
            }
            if orders.is_empty() {
                println!("No orders yet");
            }
            for order in &orders {
                println!(
                    "  #{} {} {} ({} items) {}",
                    order.id,
                    order.status,
                    order.total_amount,
                    order.item_count,
                    order.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        OrdersCommands::Show { id } => {
            let viewer = OrderViewer::new(ctx.api.clone(), OrderId::new(id));
            viewer.load().await?;
            let order = viewer.order().ok_or_else(|| anyhow!("order {id} not loaded"))?;
            if json {
                return print_json(&order);
            }
            print_order(&order);
            match viewer.action()? {
                CustomerAction::UploadReceipt => {
                    println!("Awaiting payment receipt: foodnova orders upload-receipt {id} <file>")
                }
                CustomerAction::ReceiptBadge(status) => println!("Receipt: {status}"),
                CustomerAction::NoAction => {}
            }
        }
        OrdersCommands::UploadReceipt { id, path } => {
            let viewer = OrderViewer::new(ctx.api.clone(), OrderId::new(id));
            viewer.load().await?;
            let receipt = viewer.upload_receipt_from_path(&path).await?;
            if json {
                return print_json(&receipt);
            }
            println!("Receipt uploaded ({}), awaiting review", receipt.status);
        }
        OrdersCommands::Receipt { id } => {
            let viewer = OrderViewer::new(ctx.api.clone(), OrderId::new(id));
            let receipt = viewer.receipt().await?;
            if json {
                return print_json(&receipt);
            }
            println!("Receipt #{}: {} {}", receipt.id, receipt.status, receipt.file_url);
            if let Some(note) = &receipt.admin_note {
                println!("Note: {note}");
            }
        }
    }
    Ok(())
}

async fn handle_admin(ctx: &AppContext, command: AdminCommands, json: bool) -> Result<()> {
    ctx.require_admin("/admin")?;

    match command {
        AdminCommands::Dashboard => {
            let stats = DashboardScreen::new(ctx.api.clone()).load().await?;
            if json {
                return print_json(&serde_json::json!({
                    "total_orders": stats.total_orders,
                    "pending_orders": stats.pending_orders,
                    "total_revenue": stats.total_revenue,
                    "active_products": stats.active_products,
                    "low_stock": stats.low_stock,
                }));
            }
            println!("Orders:          {}", stats.total_orders);
            println!("Pending:         {}", stats.pending_orders.len());
            println!("Revenue:         {}", stats.total_revenue);
            println!("Active products: {}", stats.active_products);
            println!("Low stock:");
            for product in &stats.low_stock {
                println!("  [{}] {} ({} left)", product.id, product.name, product.stock_qty);
            }
        }
        AdminCommands::Orders(command) => handle_admin_orders(ctx, command, json).await?,
        AdminCommands::Payments(PaymentsCommands::Update {
            order_id,
            status,
            reference,
        }) => {
            let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(order_id));
            reviewer.load().await?;
            reviewer.update_payment(status.into(), reference).await?;
            print_reviewed(&reviewer, json)?;
        }
        AdminCommands::Products(command) => handle_admin_products(ctx, command, json).await?,
        AdminCommands::Categories(command) => handle_admin_categories(ctx, command, json).await?,
        AdminCommands::Packs(command) => handle_admin_packs(ctx, command, json).await?,
    }
    Ok(())
}

async fn handle_admin_orders(ctx: &AppContext, command: AdminOrdersCommands, json: bool) -> Result<()> {
    match command {
        AdminOrdersCommands::List { status, search } => {
            let mut screen = AdminOrdersScreen::new(ctx.api.clone());
            screen.load().await?;
            screen.set_filter(OrderFilter { status, search });
            let visible = screen.visible();
            if json {
                return print_json(&visible);
            }
            for order in visible {
                println!(
                    "  #{} {} {} ({} items)",
                    order.id, order.status, order.total_amount, order.item_count
                );
            }
        }
        AdminOrdersCommands::Show { id } => {
            let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(id));
            reviewer.load().await?;
            print_reviewed(&reviewer, json)?;
        }
        AdminOrdersCommands::SetStatus { id, status } => {
            let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(id));
            reviewer.load().await?;
            reviewer.set_status(status).await?;
            print_reviewed(&reviewer, json)?;
        }
        AdminOrdersCommands::ReviewReceipt { id, decision, note } => {
            let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(id));
            reviewer.load().await?;
            reviewer.review_receipt(decision.into(), note.as_deref()).await?;
            print_reviewed(&reviewer, json)?;
        }
    }
    Ok(())
}

async fn handle_admin_products(ctx: &AppContext, command: ProductsCommands, json: bool) -> Result<()> {
    let mut admin = CatalogAdmin::new(ctx.api.clone());
    match command {
        ProductsCommands::List => admin.load().await?,
        ProductsCommands::Create {
            name,
            price,
            stock,
            image_url,
            category,
        } => {
            admin
                .create_product(ProductDraft {
                    name,
                    price: Money::new(price),
                    stock_qty: stock,
                    image_url,
                    category_id: category.map(CategoryId::new),
                })
                .await?;
        }
        ProductsCommands::Update {
            id,
            name,
            price,
            stock,
            image_url,
            category,
            active,
        } => {
            admin.load().await?;
            admin
                .update_product(
                    ProductId::new(id),
                    ProductPatch {
                        name,
                        price: price.map(Money::new),
                        stock_qty: stock,
                        image_url,
                        category_id: category.map(CategoryId::new),
                        is_active: active,
                    },
                )
                .await?;
        }
        ProductsCommands::Delete { id } => admin.delete_product(ProductId::new(id)).await?,
    }

    if json {
        return print_json(&admin.products());
    }
    for product in admin.products() {
        let flag = match (product.is_active, product.is_low_stock()) {
            (false, _) => " [inactive]",
            (true, true) => " [low stock]",
            (true, false) => "",
        };
        println!(
            "  [{}] {} {} stock={} {}{flag}",
            product.id,
            product.name,
            product.price,
            product.stock_qty,
            product.category_name.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

async fn handle_admin_categories(ctx: &AppContext, command: CategoriesCommands, json: bool) -> Result<()> {
    let mut admin = CatalogAdmin::new(ctx.api.clone());
    match command {
        CategoriesCommands::List => admin.load().await?,
        CategoriesCommands::Create { name } => admin.create_category(&name).await?,
        CategoriesCommands::Delete { id } => admin.delete_category(CategoryId::new(id)).await?,
    }

    if json {
        return print_json(&admin.categories());
    }
    for category in admin.categories() {
        println!("  [{}] {}", category.id, category.name);
    }
    Ok(())
}

async fn handle_admin_packs(ctx: &AppContext, command: PacksCommands, json: bool) -> Result<()> {
    let mut admin = CatalogAdmin::new(ctx.api.clone());
    match command {
        PacksCommands::List => admin.load().await?,
        PacksCommands::Create { name, description } => {
            admin.create_pack(PackDraft { name, description }).await?
        }
        PacksCommands::Update {
            id,
            name,
            description,
            active,
        } => {
            admin
                .update_pack(
                    PackId::new(id),
                    PackPatch {
                        name,
                        description,
                        is_active: active,
                    },
                )
                .await?
        }
        PacksCommands::Delete { id } => admin.delete_pack(PackId::new(id)).await?,
        PacksCommands::AddVariant { pack_id, name, price } => {
            admin
                .add_variant(
                    PackId::new(pack_id),
                    VariantDraft {
                        name,
                        price: Money::new(price),
                    },
                )
                .await?
        }
        PacksCommands::UpdateVariant { id, name, price } => {
            admin
                .update_variant(
                    PackVariantId::new(id),
                    VariantPatch {
                        name,
                        price: price.map(Money::new),
                    },
                )
                .await?
        }
        PacksCommands::DeleteVariant { id } => admin.delete_variant(PackVariantId::new(id)).await?,
        PacksCommands::AddItem {
            variant_id,
            product,
            qty,
        } => {
            admin
                .add_variant_item(
                    PackVariantId::new(variant_id),
                    VariantItemDraft {
                        product_id: ProductId::new(product),
                        qty,
                    },
                )
                .await?
        }
        PacksCommands::DeleteItem { id } => admin.delete_variant_item(VariantItemId::new(id)).await?,
    }

    if json {
        return print_json(&admin.packs());
    }
    for pack in admin.packs() {
        let state = if pack.is_active { "" } else { " [inactive]" };
        println!("  [{}] {}{state}", pack.id, pack.name);
        for variant in &pack.variants {
            println!("    variant [{}] {} {}", variant.id, variant.name, variant.price);
            for item in &variant.items {
                println!("      item [{}] product {} x{}", item.id, item.product_id, item.qty);
            }
        }
    }
    Ok(())
}

async fn handle_prefs(ctx: &mut AppContext, command: PrefsCommands, json: bool) -> Result<()> {
    match command {
        PrefsCommands::Theme => {}
        PrefsCommands::ToggleTheme => {
            ctx.prefs.toggle_theme().await?;
        }
        PrefsCommands::DismissInstallPrompt => {
            ctx.prefs.dismiss_install_prompt(Utc::now()).await?;
        }
    }

    if json {
        return print_json(&serde_json::json!({
            "theme": ctx.prefs.theme(),
            "install_prompt_dismissed_at": ctx.prefs.install_prompt_dismissed_at(),
        }));
    }
    println!("theme: {}", ctx.prefs.theme());
    if let Some(at) = ctx.prefs.install_prompt_dismissed_at() {
        println!("install prompt dismissed at {}", at.to_rfc3339());
    }
    Ok(())
}

fn print_reviewed(reviewer: &OrderReviewer, json: bool) -> Result<()> {
    let order = reviewer.order().ok_or_else(|| anyhow!("order not loaded"))?;
    if json {
        return print_json(&order);
    }

    print_order(&order);
    if let Some(name) = &order.user_name {
        println!("Customer: {} <{}>", name, order.user_email.as_deref().unwrap_or("-"));
    }
    match &order.receipt {
        Some(receipt) => {
            println!("Receipt #{}: {} {}", receipt.id, receipt.status, receipt.file_url);
            if let Some(note) = &receipt.admin_note {
                println!("  note: {note}");
            }
        }
        None => println!("Receipt: none"),
    }
    if let Some(payment) = &order.payment {
        println!(
            "Payment #{}: {} via {}{}",
            payment.id,
            payment.status,
            payment.method.label(),
            payment
                .reference
                .as_deref()
                .map(|r| format!(" ref {r}"))
                .unwrap_or_default()
        );
    }
    Ok(())
}

fn print_order(order: &Order) {
    println!(
        "Order #{} [{}] {} placed {}",
        order.id,
        order.status,
        order.total_amount,
        order.created_at.format("%Y-%m-%d %H:%M")
    );
    println!("  deliver to: {}", order.delivery_address);
    println!("  phone: {}", order.phone);
    for item in &order.items {
        println!("  {} x{} @ {} = {}", item.name_snapshot, item.qty, item.unit_price, item.line_total);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
