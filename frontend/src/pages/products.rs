use crate::api::use_api;
use crate::cart::use_cart;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::{PageHeader, Stars};
use crate::components::icons::{Package, Search, ShoppingCart};
use crate::components::pagination::Pagination;
use crate::components::reveal::FadeIn;
use crate::components::spinner::PageSpinner;
use crate::config::use_config;
use crate::pages::{Remote, fetch};
use crate::web::router::Link;
use fitlife_shared::listing::{ProductFilter, paginate, parse_price};
use fitlife_shared::protocol::{ListCategories, ListProducts};
use fitlife_shared::{Product, format_amount};
use leptos::prelude::*;

/// 商品卡片：详情链接与加入购物车
#[component]
pub fn ProductCard(product: Product, notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let cart = use_cart();
    let in_stock = product.in_stock();
    let stock_label = product.stock_label();
    let detail = format!("/products/{}", product.id);
    let stored = StoredValue::new(product.clone());
    let Product { name, description, category, price, rating, total_reviews, image_url, .. } = product;

    let add = move |_| {
        stored.with_value(|p| {
            cart.add(p, 1);
            notice.set(Some(Notice::success(format!("{} added to cart", p.name))));
        });
    };

    view! {
        <div class="card bg-base-100 shadow hover:shadow-xl transition-shadow h-full">
            <figure class="h-40 bg-base-200">
                {match image_url {
                    Some(src) => view! { <img src=src alt=name.clone() class="h-full w-full object-cover" /> }.into_any(),
                    None => view! { <Package attr:class="h-16 w-16 text-base-content/20" /> }.into_any(),
                }}
            </figure>
            <div class="card-body p-4 gap-2">
                <Link to=detail.clone() class="card-title text-base hover:link">{name}</Link>
                <p class="text-sm text-base-content/70 line-clamp-2">{description}</p>
                <div class="flex items-center gap-2 text-sm">
                    <Stars rating=rating />
                    <span class="text-base-content/60">{format!("({})", total_reviews)}</span>
                </div>
                <div class="flex items-center justify-between">
                    <span class="badge badge-ghost">{category}</span>
                    <span class="text-lg font-bold text-primary">{format!("₹{}", format_amount(price))}</span>
                </div>
                <p class={if in_stock { "text-xs text-success" } else { "text-xs text-error" }}>{stock_label}</p>
                <div class="card-actions mt-auto">
                    <button class="btn btn-primary btn-sm flex-1 gap-1" disabled=!in_stock on:click=add>
                        <ShoppingCart attr:class="h-4 w-4" />
                        "Add to Cart"
                    </button>
                    <Link to=detail class="btn btn-outline btn-sm">"Details"</Link>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let api = use_api();
    let per_page = use_config().page_size;

    let products = Remote::<Vec<Product>>::new();
    let categories = Remote::<Vec<String>>::new();
    let filter = RwSignal::new(ProductFilter::default());
    let page = RwSignal::new(1usize);
    let notice = RwSignal::new(Option::<Notice>::None);

    fetch(&api, ListCategories, categories);

    // 过滤条件变化时重新请求并回到第一页；旧请求随 effect 重跑而作废
    Effect::new(move |_| {
        let filter = filter.get();
        page.set(1);
        fetch(&api, ListProducts { filter }, products);
    });

    let current = Memo::new(move |_| products.data.with(|d| {
        let items = d.as_deref().unwrap_or_default();
        paginate(items, page.get(), per_page)
    }));

    let set_text = move |apply: fn(&mut ProductFilter, String)| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            filter.update(|f| apply(f, value));
        }
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8">
            <Toast notice=notice />
            <PageHeader title="Health Products" subtitle="Discover supplements, fitness equipment, and healthy snacks" />

            <div class="card bg-base-100 shadow mb-6">
                <div class="card-body grid sm:grid-cols-2 md:grid-cols-4 gap-3">
                    <label class="input input-bordered flex items-center gap-2">
                        <Search attr:class="h-4 w-4 opacity-60" />
                        <input
                            type="search"
                            class="grow"
                            placeholder="Search products"
                            prop:value=move || filter.with(|f| f.search.clone())
                            on:change=set_text(|f, v| f.search = v)
                        />
                    </label>
                    <select
                        class="select select-bordered"
                        prop:value=move || filter.with(|f| f.category.clone())
                        on:change=set_text(|f, v| f.category = v)
                    >
                        <option value="">"All Categories"</option>
                        {move || categories
                            .value()
                            .into_iter()
                            .map(|c| {
                                let label = c.clone();
                                view! { <option value=c>{label}</option> }
                            })
                            .collect_view()}
                    </select>
                    <input
                        type="number"
                        min="0"
                        class="input input-bordered"
                        placeholder="Min Price"
                        on:change=set_text(|f, v| f.min_price = parse_price(&v))
                    />
                    <input
                        type="number"
                        min="0"
                        class="input input-bordered"
                        placeholder="Max Price"
                        on:change=set_text(|f, v| f.max_price = parse_price(&v))
                    />
                </div>
            </div>

            <ErrorAlert message=products.error />

            <Show when=move || !products.is_loading() fallback=|| view! { <PageSpinner /> }>
                <Show
                    when={move || current.with(|p| p.total_items > 0)}
                    fallback=move || view! {
                        <div class="text-center py-16">
                            <p class="text-xl text-base-content/60 mb-4">"No products found"</p>
                            <button class="btn btn-outline" on:click=move |_| filter.set(ProductFilter::default())>
                                "Clear Filters"
                            </button>
                        </div>
                    }
                >
                    <p class="text-sm text-base-content/60 mb-3">
                        {move || format!("{} products", current.with(|p| p.total_items))}
                    </p>
                    <div class="grid sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6">
                        <For
                            each=move || current.with(|p| p.items.clone())
                            key=|p| p.id
                            children=move |product: Product| view! {
                                <FadeIn>
                                    <ProductCard product=product notice=notice />
                                </FadeIn>
                            }
                        />
                    </div>
                    <Pagination page=page total_pages=Signal::derive(move || current.with(|p| p.total_pages)) />
                </Show>
            </Show>
        </div>
    }
}
