//! Randomized invariant checks for the cart ledger and the query engine.
//!
//! Seeded so failures reproduce.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use storefront_core::catalog::query;
use storefront_core::{
    Cart, CartLedger, CartLine, CatalogQuery, Money, Product, Rating, SortDirection, SortKey,
    TaxRate,
};

const CATEGORIES: [&str; 4] = ["electronics", "jewelery", "men's clothing", "women's clothing"];
const WORDS: [&str; 6] = ["cotton", "gold", "drive", "jacket", "slim", "ring"];

fn random_product(rng: &mut StdRng, id: u64) -> Product {
    let title = format!(
        "{} {}",
        WORDS[rng.gen_range(0..WORDS.len())],
        WORDS[rng.gen_range(0..WORDS.len())]
    );
    Product {
        id,
        title,
        price: Money::from_cents(rng.gen_range(0..100_000)),
        description: WORDS[rng.gen_range(0..WORDS.len())].to_string(),
        category: CATEGORIES[rng.gen_range(0..CATEGORIES.len())].to_string(),
        image: String::new(),
        rating: Rating {
            rate: f64::from(rng.gen_range(0..=50u8)) / 10.0,
            count: rng.gen_range(0..500),
        },
    }
}

fn random_catalog(rng: &mut StdRng) -> Vec<Product> {
    let len = rng.gen_range(0..40);
    (1..=len).map(|id| random_product(rng, id)).collect()
}

fn assert_consistent(cart: &Cart, rate: TaxRate) {
    let subtotal: Money = cart.items().iter().map(|l| l.line_total().unwrap()).sum();
    assert_eq!(cart.subtotal(), subtotal);
    assert_eq!(cart.tax(), subtotal.calculate_tax(rate));
    assert_eq!(cart.total(), cart.subtotal() + cart.tax());
    assert_eq!(
        cart.total_items(),
        cart.items().iter().map(|l| u64::from(l.quantity)).sum::<u64>()
    );
    assert!(cart.items().iter().all(|l| l.quantity > 0));
}

#[test]
fn cart_totals_hold_after_every_operation() {
    let mut rng = StdRng::seed_from_u64(0x5707_efa0);

    for _ in 0..200 {
        let catalog: Vec<Product> = (1..=8).map(|id| random_product(&mut rng, id)).collect();
        let rate = TaxRate::from_bps(rng.gen_range(0..=2500));
        let mut ledger = CartLedger::new(rate);

        for _ in 0..50 {
            let product = &catalog[rng.gen_range(0..catalog.len())];
            let cart = match rng.gen_range(0..4) {
                0 => ledger.add_item(product, rng.gen_range(1..5)).unwrap(),
                1 => ledger.remove_item(product.id),
                2 => ledger.set_quantity(product.id, rng.gen_range(-2..6)).unwrap(),
                _ => match ledger.add_item(product, 0) {
                    Ok(_) => panic!("zero quantity accepted"),
                    Err(_) => ledger.cart(),
                },
            };

            assert_consistent(&cart, rate);
            assert_eq!(cart, ledger.cart());

            let mut ids: Vec<_> = cart.items().iter().map(CartLine::product_id).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), before, "duplicate line");
        }
    }
}

#[test]
fn total_matched_equals_filtered_length() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..300 {
        let products = random_catalog(&mut rng);

        let category = if rng.gen_bool(0.5) {
            Some(CATEGORIES.choose(&mut rng).unwrap_or(&"electronics").to_string())
        } else {
            None
        };
        let word = WORDS.choose(&mut rng).unwrap_or(&"gold");
        let search = match rng.gen_range(0..6) {
            0 => String::new(),
            1 => word.to_uppercase(),
            2 => format!(" {} ", word),
            3 => " ".to_string(),
            4 => format!("{} ", word),
            _ => "x".repeat(rng.gen_range(99..=102)),
        };

        let mut q = CatalogQuery::new()
            .search(search.clone())
            .page(rng.gen_range(0..6))
            .page_size(rng.gen_range(1..12));
        if let Some(category) = &category {
            q = q.category(category.clone());
        }

        let expected = products
            .iter()
            .filter(|p| category.as_ref().map_or(true, |c| p.category == *c))
            .filter(|p| {
                let needle = search.to_lowercase();
                p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .count();

        let page = query(&products, &q).unwrap();

        assert_eq!(page.total_matched, expected);
        assert!(page.items.len() <= q.page_size as usize);
    }
}

#[test]
fn pages_partition_the_matches() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let products = random_catalog(&mut rng);
        let q = CatalogQuery::new()
            .sort(SortKey::Price, SortDirection::Desc)
            .page_size(rng.gen_range(1..10));

        let first = query(&products, &q).unwrap();
        let mut seen = Vec::new();
        for page in 1..=first.total_pages() as u32 {
            seen.extend(query(&products, &q.clone().page(page)).unwrap().items);
        }

        assert_eq!(seen.len(), first.total_matched);
        assert!(seen.windows(2).all(|w| w[0].price >= w[1].price));
    }
}
