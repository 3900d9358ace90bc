use crate::api::use_api;
use crate::components::alert::ErrorAlert;
use crate::components::card::{PageHeader, Stars};
use crate::components::icons::{Calendar, Search};
use crate::components::reveal::FadeIn;
use crate::components::spinner::PageSpinner;
use crate::pages::{Remote, fetch};
use crate::web::router::Link;
use fitlife_shared::consultation::SPECIALIZATIONS;
use fitlife_shared::listing::matches_search;
use fitlife_shared::protocol::ListConsultants;
use fitlife_shared::{Consultant, format_amount};
use leptos::prelude::*;

/// 简介截断为前 150 个字符
fn bio_excerpt(bio: &str) -> String {
    const LIMIT: usize = 150;
    if bio.chars().count() <= LIMIT {
        bio.to_string()
    } else {
        let cut: String = bio.chars().take(LIMIT).collect();
        format!("{}...", cut.trim_end())
    }
}

fn consultant_matches(c: &Consultant, query: &str) -> bool {
    let (first, last) = c
        .user
        .as_ref()
        .map(|u| (u.first_name.as_str(), u.last_name.as_str()))
        .unwrap_or_default();
    matches_search(query, &[first, last, &c.specialization])
}

#[component]
fn ConsultantCard(consultant: Consultant) -> impl IntoView {
    let initials = consultant.user.as_ref().map(|u| u.initials()).unwrap_or_default();
    let available = consultant.is_available;

    view! {
        <div class="card bg-base-100 shadow h-full transition-transform hover:-translate-y-1">
            <div class="card-body gap-3">
                <div class="flex items-center gap-3">
                    <div class="avatar placeholder">
                        <div class="bg-primary text-primary-content rounded-full w-14">
                            <span class="text-lg">{initials}</span>
                        </div>
                    </div>
                    <div>
                        <h2 class="card-title text-lg">{consultant.display_name()}</h2>
                        <p class="text-sm text-base-content/60">{consultant.specialization.clone()}</p>
                    </div>
                </div>
                <div class="flex items-center gap-2 text-sm">
                    <Stars rating=consultant.rating />
                    <span class="text-base-content/60">{format!("({} consultations)", consultant.total_consultations)}</span>
                </div>
                <p class="font-bold text-primary">{format!("₹{}/hour", format_amount(consultant.hourly_rate))}</p>
                <p class="text-sm text-base-content/70">{bio_excerpt(&consultant.bio)}</p>
                <div>
                    <p class="text-sm font-semibold">{format!("Experience: {} years", consultant.experience_years)}</p>
                    <p class="text-sm text-base-content/60">{consultant.qualifications.clone()}</p>
                </div>
                <span class={if available { "badge badge-success" } else { "badge badge-ghost" }}>
                    {if available { "Available" } else { "Unavailable" }}
                </span>
                <div class="card-actions mt-auto">
                    {if available {
                        view! {
                            <Link to="/consultations" class="btn btn-primary btn-block gap-2">
                                <Calendar attr:class="h-4 w-4" />
                                "Book Consultation"
                            </Link>
                        }
                        .into_any()
                    } else {
                        view! { <button class="btn btn-block" disabled=true>"Currently Unavailable"</button> }.into_any()
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ConsultantsPage() -> impl IntoView {
    let api = use_api();
    let consultants = Remote::<Vec<Consultant>>::new();
    let (search, set_search) = signal(String::new());
    let (specialization, set_specialization) = signal(String::new());

    // 专长过滤交给后端，姓名搜索在本地完成
    Effect::new(move |_| {
        let specialization = Some(specialization.get()).filter(|s| !s.is_empty());
        fetch(&api, ListConsultants { specialization }, consultants);
    });

    let visible = Memo::new(move |_| {
        let query = search.get();
        consultants
            .value()
            .into_iter()
            .filter(|c| consultant_matches(c, &query))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8">
            <PageHeader
                title="Our Expert Consultants"
                subtitle="Connect with certified professionals for personalized health guidance"
            />
            <div class="card bg-base-100 shadow mb-6">
                <div class="card-body grid sm:grid-cols-2 md:grid-cols-3 gap-3">
                    <label class="input input-bordered flex items-center gap-2">
                        <Search attr:class="h-4 w-4 opacity-60" />
                        <input
                            type="search"
                            class="grow"
                            placeholder="Search consultants"
                            prop:value=search
                            on:input=move |ev| set_search.set(event_target_value(&ev))
                        />
                    </label>
                    <select
                        class="select select-bordered"
                        prop:value=specialization
                        on:change=move |ev| set_specialization.set(event_target_value(&ev))
                    >
                        <option value="">"All Specializations"</option>
                        {SPECIALIZATIONS
                            .iter()
                            .map(|s| view! { <option value=*s>{*s}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <ErrorAlert message=consultants.error />
            <Show when=move || !consultants.is_loading() fallback=|| view! { <PageSpinner /> }>
                <Show
                    when=move || visible.with(|v| !v.is_empty())
                    fallback=|| view! {
                        <p class="text-center text-lg text-base-content/60 py-16">
                            "No consultants found matching your criteria"
                        </p>
                    }
                >
                    <div class="grid sm:grid-cols-2 lg:grid-cols-3 gap-6">
                        <For
                            each=move || visible.get()
                            key=|c| c.id
                            children=|c: Consultant| view! {
                                <FadeIn>
                                    <ConsultantCard consultant=c />
                                </FadeIn>
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn consultant() -> Consultant {
        serde_json::from_value(json!({
            "id": 2,
            "user_id": 8,
            "specialization": "Sports Nutritionist",
            "user": { "id": 8, "username": "kim", "email": "k@x.io", "first_name": "Kim", "last_name": "Park" }
        }))
        .unwrap()
    }

    #[test]
    fn search_covers_name_and_specialization() {
        let c = consultant();
        assert!(consultant_matches(&c, "kim"));
        assert!(consultant_matches(&c, "PARK"));
        assert!(consultant_matches(&c, "sports"));
        assert!(consultant_matches(&c, ""));
        assert!(!consultant_matches(&c, "yoga"));
    }

    #[test]
    fn long_bio_is_truncated() {
        let bio = "a".repeat(200);
        let excerpt = bio_excerpt(&bio);
        assert_eq!(excerpt.len(), 153);
        assert!(excerpt.ends_with("..."));
        assert_eq!(bio_excerpt("short"), "short");
    }
}
