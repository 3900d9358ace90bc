use crate::api::use_api;
use crate::auth::use_auth;
use crate::cart::use_cart;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::Stars;
use crate::components::icons::{ArrowLeft, MessageSquare, Package, ShoppingCart, Star};
use crate::components::spinner::PageSpinner;
use crate::pages::{Remote, fetch, non_empty, submit};
use crate::web::router::Link;
use fitlife_shared::catalog::ReviewInput;
use fitlife_shared::protocol::{CreateReview, GetProduct, ListReviews};
use fitlife_shared::{Product, ProductReview, format_amount};
use leptos::prelude::*;

/// 数量输入夹在 1 与库存之间
fn clamp_quantity(input: &str, stock: u32) -> u32 {
    input.trim().parse::<u32>().unwrap_or(1).clamp(1, stock.max(1))
}

#[component]
fn ReviewForm(product_id: i64, reviews: Remote<Vec<ProductReview>>, notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let api = use_api();
    let (rating, set_rating) = signal(5u8);
    let (text, set_text) = signal(String::new());
    let (sending, set_sending) = signal(false);
    let error = RwSignal::new(Option::<String>::None);

    Effect::new(move |_| {
        if error.get().is_some() {
            set_sending.set(false);
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_sending.set(true);
        let input = ReviewInput {
            product_id,
            rating: rating.get_untracked(),
            review_text: non_empty(text.get_untracked()),
        };
        submit(&api, CreateReview(input), error, move |review| {
            reviews.patch(|list| list.insert(0, review));
            set_rating.set(5);
            set_text.set(String::new());
            set_sending.set(false);
            notice.set(Some(Notice::success("Review submitted successfully!")));
        });
    };

    view! {
        <form class="bg-base-200 rounded-box p-4 flex flex-col gap-3 mb-6" on:submit=on_submit>
            <h3 class="font-semibold">"Write a Review"</h3>
            <ErrorAlert message=error />
            <div class="flex items-center gap-2">
                <span class="text-sm">"Rating:"</span>
                <div class="flex gap-1">
                    {(1..=5u8)
                        .map(|n| view! {
                            <button
                                type="button"
                                class="btn btn-ghost btn-xs px-0"
                                class:text-warning={move || rating.get() >= n}
                                on:click=move |_| set_rating.set(n)
                            >
                                <Star attr:class="h-5 w-5" />
                            </button>
                        })
                        .collect_view()}
                </div>
            </div>
            <textarea
                class="textarea textarea-bordered"
                rows="3"
                placeholder="Your Review"
                prop:value=text
                on:input=move |ev| set_text.set(event_target_value(&ev))
            ></textarea>
            <div>
                <button class="btn btn-primary btn-sm" disabled=move || sending.get()>
                    {move || if sending.get() { "Submitting..." } else { "Submit Review" }}
                </button>
            </div>
        </form>
    }
}

#[component]
pub fn ProductDetailPage(id: i64) -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let cart = use_cart();

    let product = Remote::<Product>::new();
    let reviews = Remote::<Vec<ProductReview>>::new();
    let notice = RwSignal::new(Option::<Notice>::None);
    let (quantity, set_quantity) = signal(1u32);

    fetch(&api, GetProduct { id }, product);
    fetch(&api, ListReviews { product_id: id }, reviews);

    let signed_in = move || auth.state.with(|s| s.is_authenticated());

    let add_to_cart = move |_| {
        product.data.with_untracked(|p| {
            if let Some(p) = p {
                cart.add(p, quantity.get_untracked());
                notice.set(Some(Notice::success(format!("{} added to cart", p.name))));
            }
        });
    };

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8">
            <Toast notice=notice />
            <Link to="/products" class="btn btn-ghost btn-sm gap-1 mb-4">
                <ArrowLeft attr:class="h-4 w-4" />
                "Back to Products"
            </Link>
            <ErrorAlert message=product.error />

            <Show when=move || !product.is_loading() fallback=|| view! { <PageSpinner /> }>
                {move || product.data.get().map(|p| {
                    let stock = p.stock_quantity;
                    let in_stock = p.in_stock();
                    view! {
                        <div class="grid md:grid-cols-2 gap-8">
                            <figure class="bg-base-200 rounded-box h-80 flex items-center justify-center overflow-hidden">
                                {match p.image_url.clone() {
                                    Some(src) => view! { <img src=src alt=p.name.clone() class="h-full w-full object-cover" /> }.into_any(),
                                    None => view! { <Package attr:class="h-24 w-24 text-base-content/20" /> }.into_any(),
                                }}
                            </figure>
                            <div class="flex flex-col gap-3">
                                <h1 class="text-3xl font-bold">{p.name.clone()}</h1>
                                <div class="flex items-center gap-2">
                                    <Stars rating=p.rating />
                                    <span class="text-sm text-base-content/60">
                                        {format!("{:.1} ({} reviews)", p.rating, p.total_reviews)}
                                    </span>
                                </div>
                                <span class="badge badge-outline">{p.category.clone()}</span>
                                <p class="text-3xl font-bold text-primary">{format!("₹{}", format_amount(p.price))}</p>
                                <p>{p.description.clone()}</p>
                                <p class={if in_stock { "text-success" } else { "text-error" }}>{p.stock_label()}</p>
                                <div class="flex items-end gap-3">
                                    <label class="form-control w-28">
                                        <span class="label-text mb-1">"Quantity"</span>
                                        <input
                                            type="number"
                                            min="1"
                                            max=stock
                                            class="input input-bordered"
                                            prop:value=move || quantity.get().to_string()
                                            on:change=move |ev| set_quantity.set(clamp_quantity(&event_target_value(&ev), stock))
                                        />
                                    </label>
                                    <button class="btn btn-primary gap-2" disabled=!in_stock on:click=add_to_cart>
                                        <ShoppingCart attr:class="h-5 w-5" />
                                        "Add to Cart"
                                    </button>
                                </div>
                                {p.ingredients.clone().map(|i| view! {
                                    <div class="mt-2">
                                        <h3 class="font-semibold">"Ingredients"</h3>
                                        <p class="text-sm text-base-content/70">{i}</p>
                                    </div>
                                })}
                                {p.nutritional_info.clone().map(|n| view! {
                                    <div>
                                        <h3 class="font-semibold">"Nutritional Information"</h3>
                                        <p class="text-sm text-base-content/70">{n}</p>
                                    </div>
                                })}
                            </div>
                        </div>
                    }
                })}

                <div class="card bg-base-100 shadow mt-8">
                    <div class="card-body">
                        <h2 class="card-title">
                            <MessageSquare attr:class="h-5 w-5" />
                            {move || format!("Customer Reviews ({})", reviews.value().len())}
                        </h2>
                        <Show
                            when=signed_in
                            fallback=move || view! {
                                <p class="text-sm text-base-content/70 mb-4">
                                    <Link to=format!("/login?next=/products/{id}") class="link link-primary">"Sign in"</Link>
                                    " to write a review."
                                </p>
                            }
                        >
                            <ReviewForm product_id=id reviews=reviews notice=notice />
                        </Show>
                        <Show
                            when=move || !reviews.value().is_empty()
                            fallback=|| view! { <p class="text-base-content/50">"No reviews yet. Be the first to review this product!"</p> }
                        >
                            <ul class="divide-y divide-base-200">
                                <For
                                    each=move || reviews.value()
                                    key=|r| r.id
                                    children=|r: ProductReview| view! {
                                        <li class="py-3">
                                            <div class="flex items-center justify-between">
                                                <span class="font-semibold">{r.author()}</span>
                                                <span class="text-xs text-base-content/50">
                                                    {r.created_at.map(|t| t.format_date()).unwrap_or_default()}
                                                </span>
                                            </div>
                                            <Stars rating=f64::from(r.rating) />
                                            {r.review_text.clone().map(|t| view! { <p class="text-sm mt-1">{t}</p> })}
                                        </li>
                                    }
                                />
                            </ul>
                        </Show>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_stays_within_stock() {
        assert_eq!(clamp_quantity("3", 10), 3);
        assert_eq!(clamp_quantity("0", 10), 1);
        assert_eq!(clamp_quantity("25", 10), 10);
        assert_eq!(clamp_quantity("abc", 10), 1);
        assert_eq!(clamp_quantity("2", 0), 1);
    }
}
