//! 反馈管理：商品评价与咨询反馈两个标签页

use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::{PageHeader, Stars};
use crate::components::icons::{Eye, Trash};
use crate::components::modal::{Modal, confirm};
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, submit};
use fitlife_shared::catalog::RatingFilter;
use fitlife_shared::protocol::{
    AdminDeleteReview, AdminListConsultations, AdminListProducts, AdminListReviews,
};
use fitlife_shared::{Consultation, Product, ProductReview};
use leptos::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Reviews,
    Consultations,
}

fn filter_reviews(reviews: &[ProductReview], filter: RatingFilter) -> Vec<ProductReview> {
    reviews.iter().filter(|r| filter.matches(r.rating)).cloned().collect()
}

/// 只保留带评分或文字反馈的咨询
fn filter_feedback(consultations: &[Consultation], filter: RatingFilter) -> Vec<Consultation> {
    consultations
        .iter()
        .filter(|c| c.has_feedback())
        .filter(|c| c.rating.is_none_or(|r| filter.matches(r)))
        .cloned()
        .collect()
}

fn rating_cell(rating: Option<u8>) -> AnyView {
    match rating {
        Some(r) => view! { <Stars rating=f64::from(r) /> }.into_any(),
        None => view! { <span class="text-base-content/40">"-"</span> }.into_any(),
    }
}

#[component]
pub fn AdminFeedbackPage() -> impl IntoView {
    let api = use_api();
    let reviews = Remote::<Vec<ProductReview>>::new();
    let consultations = Remote::<Vec<Consultation>>::new();
    let products = Remote::<Vec<Product>>::new();
    fetch(&api, AdminListReviews, reviews);
    fetch(&api, AdminListConsultations, consultations);
    fetch(&api, AdminListProducts, products);

    let (tab, set_tab) = signal(Tab::Reviews);
    let (filter, set_filter) = signal(RatingFilter::All);
    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let detail = RwSignal::new(Option::<ProductReview>::None);
    let detail_open = RwSignal::new(false);

    let product_names = Memo::new(move |_| {
        products
            .value()
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect::<HashMap<_, _>>()
    });
    let product_name = move |id: i64| {
        product_names.with(|names| names.get(&id).cloned().unwrap_or_else(|| format!("Product #{id}")))
    };

    let visible_reviews = move || reviews.data.with(|d| filter_reviews(d.as_deref().unwrap_or_default(), filter.get()));
    let visible_feedback =
        move || consultations.data.with(|d| filter_feedback(d.as_deref().unwrap_or_default(), filter.get()));
    let feedback_total = move || consultations.data.with(|d| d.iter().flatten().filter(|c| c.has_feedback()).count());

    let remove = Callback::new(move |id: i64| {
        if !confirm("Are you sure you want to delete this review?") {
            return;
        }
        submit(&api, AdminDeleteReview { id }, action_error, move |_| {
            reviews.patch(|list| list.retain(|r| r.id != id));
            detail_open.set(false);
            notice.set(Some(Notice::success("Review deleted successfully")));
        });
    });

    let loading = move || reviews.is_loading() || consultations.is_loading();

    view! {
        <Toast notice=notice />
        <PageHeader title="Feedback Management" subtitle="Monitor product reviews and consultation feedback">
            <select
                class="select select-bordered select-sm"
                on:change=move |ev| set_filter.set(RatingFilter::parse(&event_target_value(&ev)))
            >
                <option value="all">"All Ratings"</option>
                <option value="high">"High (4-5 stars)"</option>
                <option value="low">"Low (1-2 stars)"</option>
            </select>
        </PageHeader>
        <ErrorAlert message=reviews.error />
        <ErrorAlert message=consultations.error />
        <ErrorAlert message=action_error />

        <div role="tablist" class="tabs tabs-boxed mb-4 w-fit">
            <button
                role="tab"
                class="tab"
                class:tab-active=move || tab.get() == Tab::Reviews
                on:click=move |_| set_tab.set(Tab::Reviews)
            >
                {move || format!("Product Reviews ({})", reviews.value().len())}
            </button>
            <button
                role="tab"
                class="tab"
                class:tab-active=move || tab.get() == Tab::Consultations
                on:click=move |_| set_tab.set(Tab::Consultations)
            >
                {move || format!("Consultation Feedback ({})", feedback_total())}
            </button>
        </div>

        <Show when=move || !loading() fallback=|| view! { <PageSpinner /> }>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <Show
                    when=move || tab.get() == Tab::Reviews
                    fallback=move || view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Consultation"</th>
                                    <th>"User"</th>
                                    <th>"Consultant"</th>
                                    <th>"Rating"</th>
                                    <th>"Feedback"</th>
                                    <th>"Date"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || visible_feedback().is_empty()>
                                    <EmptyRow colspan=6 text="No consultation feedback found" />
                                </Show>
                                <For
                                    each=visible_feedback
                                    key=|c| c.id
                                    children=|c: Consultation| view! {
                                        <tr class="hover">
                                            <td>{format!("#{}", c.id)}</td>
                                            <td>{c.client_name()}</td>
                                            <td>{c.consultant_name()}</td>
                                            <td>{rating_cell(c.rating)}</td>
                                            <td class="max-w-sm whitespace-normal">{c.feedback.clone().unwrap_or_default()}</td>
                                            <td>{c.scheduled_time.format_date()}</td>
                                        </tr>
                                    }
                                />
                            </tbody>
                        </table>
                    }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Product"</th>
                                <th>"User"</th>
                                <th>"Rating"</th>
                                <th>"Review"</th>
                                <th>"Date"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || visible_reviews().is_empty()>
                                <EmptyRow colspan=6 text="No product reviews found" />
                            </Show>
                            <For
                                each=visible_reviews
                                key=|r| r.id
                                children=move |r: ProductReview| {
                                    let id = r.id;
                                    let stored = StoredValue::new(r.clone());
                                    view! {
                                        <tr class="hover">
                                            <td>{product_name(r.product_id)}</td>
                                            <td>{r.author()}</td>
                                            <td>{rating_cell(Some(r.rating))}</td>
                                            <td class="max-w-xs truncate">{r.review_text.clone().unwrap_or_default()}</td>
                                            <td>{r.created_at.map(|t| t.format_date()).unwrap_or_default()}</td>
                                            <td>
                                                <div class="flex gap-1">
                                                    <button
                                                        class="btn btn-ghost btn-xs"
                                                        title="View"
                                                        on:click=move |_| {
                                                            detail.set(Some(stored.get_value()));
                                                            detail_open.set(true);
                                                        }
                                                    >
                                                        <Eye attr:class="h-4 w-4" />
                                                    </button>
                                                    <button class="btn btn-ghost btn-xs text-error" title="Delete" on:click=move |_| remove.run(id)>
                                                        <Trash attr:class="h-4 w-4" />
                                                    </button>
                                                </div>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </div>
        </Show>

        <Modal open=detail_open title="Review Details">
            {move || {
                detail
                    .get()
                    .map(|r| {
                        let id = r.id;
                        view! {
                            <div class="flex flex-col gap-3">
                                <p><span class="font-semibold">"Product: "</span>{product_name(r.product_id)}</p>
                                <p><span class="font-semibold">"User: "</span>{r.author()}</p>
                                <Stars rating=f64::from(r.rating) />
                                <p class="whitespace-pre-line">{r.review_text.clone().unwrap_or_else(|| "No written review".to_string())}</p>
                                <p class="text-sm text-base-content/60">
                                    {r.created_at.map(|t| t.format_date_time()).unwrap_or_default()}
                                </p>
                                <div class="modal-action">
                                    <button class="btn btn-ghost" on:click=move |_| detail_open.set(false)>"Close"</button>
                                    <button class="btn btn-error" on:click=move |_| remove.run(id)>"Delete Review"</button>
                                </div>
                            </div>
                        }
                    })
            }}
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feedback_tab_skips_sessions_without_feedback() {
        let list: Vec<Consultation> = serde_json::from_value(json!([
            { "id": 1, "user_id": 1, "consultant_id": 2, "scheduled_time": "2024-05-01T10:00:00", "rating": 5 },
            { "id": 2, "user_id": 1, "consultant_id": 2, "scheduled_time": "2024-05-02T10:00:00" },
            { "id": 3, "user_id": 1, "consultant_id": 2, "scheduled_time": "2024-05-03T10:00:00", "rating": 1, "feedback": "late" },
            { "id": 4, "user_id": 1, "consultant_id": 2, "scheduled_time": "2024-05-04T10:00:00", "feedback": "ok" }
        ]))
        .unwrap();

        let ids = |f| filter_feedback(&list, f).iter().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(ids(RatingFilter::All), vec![1, 3, 4]);
        assert_eq!(ids(RatingFilter::High), vec![1, 4]);
        assert_eq!(ids(RatingFilter::Low), vec![3, 4]);
    }

    #[test]
    fn review_filter_by_rating() {
        let list: Vec<ProductReview> = serde_json::from_value(json!([
            { "id": 1, "product_id": 9, "user_id": 1, "rating": 5 },
            { "id": 2, "product_id": 9, "user_id": 2, "rating": 3 }
        ]))
        .unwrap();
        assert_eq!(filter_reviews(&list, RatingFilter::High).len(), 1);
        assert!(filter_reviews(&list, RatingFilter::Low).is_empty());
    }
}
