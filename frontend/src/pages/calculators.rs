//! 健康计算器：BMI、每日热量、体脂率
//!
//! 计算均由后端完成；BMI 与热量使用资料中的身体数据，体脂率使用当场输入的围度。

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::alert::ErrorAlert;
use crate::components::card::PageHeader;
use crate::components::icons::{Activity, Calculator, Heart};
use crate::pages::{parse_opt, submit};
use crate::web::router::Link;
use fitlife_shared::health::{BmiResult, BodyFatResult, CalorieResult, Macro};
use fitlife_shared::protocol::{BmiCalculation, BodyFatCalculation, CalorieCalculation};
use leptos::prelude::*;

#[component]
fn MacroRow(#[prop(into)] name: String, value: Macro, class: &'static str) -> impl IntoView {
    view! {
        <tr>
            <td class=class>{name}</td>
            <td class="text-right">{format!("{:.0} g", value.grams)}</td>
            <td class="text-right">{format!("{:.0} kcal", value.calories)}</td>
        </tr>
    }
}

#[component]
fn BmiCard() -> impl IntoView {
    let api = use_api();
    let user = use_auth().user();
    let result = RwSignal::new(Option::<BmiResult>::None);
    let error = RwSignal::new(Option::<String>::None);
    let (loading, set_loading) = signal(false);

    let metrics = move || user.with(|u| u.as_ref().and_then(|u| Some((u.height?, u.weight?))));

    Effect::new(move |_| {
        if result.get().is_some() || error.get().is_some() {
            set_loading.set(false);
        }
    });

    let calculate = move |_| {
        let Some((height, weight)) = metrics() else {
            return;
        };
        set_loading.set(true);
        submit(&api, BmiCalculation { height, weight }, error, move |r| result.set(Some(r)));
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title"><Calculator attr:class="h-5 w-5 text-primary" />"BMI Calculator"</h2>
                <p class="text-sm text-base-content/70">
                    "Body Mass Index (BMI) is a measure of body fat based on height and weight."
                </p>
                <div class="text-sm my-2 space-y-1">
                    <p>{move || match user.get().and_then(|u| u.height) {
                        Some(h) => format!("Height: {h} cm"),
                        None => "Height: Not set in profile".to_string(),
                    }}</p>
                    <p>{move || match user.get().and_then(|u| u.weight) {
                        Some(w) => format!("Weight: {w} kg"),
                        None => "Weight: Not set in profile".to_string(),
                    }}</p>
                </div>
                <button
                    class="btn btn-primary"
                    disabled=move || loading.get() || metrics().is_none()
                    on:click=calculate
                >
                    {move || if loading.get() { "Calculating..." } else { "Calculate BMI" }}
                </button>
                <ErrorAlert message=error />
                {move || {
                    result.get().map(|r| {
                        let category = r.classification();
                        view! {
                            <div class="divider my-2"></div>
                            <div class="text-center space-y-2">
                                <p class="text-5xl font-bold text-primary">{format!("{:.1}", r.bmi)}</p>
                                <span class=category.tone().badge_class()>{r.category.clone()}</span>
                                <p class="text-sm text-base-content/70">
                                    {format!(
                                        "Ideal weight range: {:.1} - {:.1} kg",
                                        r.ideal_weight_range.min,
                                        r.ideal_weight_range.max,
                                    )}
                                </p>
                            </div>
                        }
                    })
                }}
                <Show when=move || metrics().is_none()>
                    <div role="alert" class="alert alert-info text-sm">
                        <span>"Please complete your profile with height and weight to use this calculator."</span>
                        <Link to="/profile" class="btn btn-xs">"Profile"</Link>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn CalorieCard() -> impl IntoView {
    let api = use_api();
    let user = use_auth().user();
    let result = RwSignal::new(Option::<CalorieResult>::None);
    let error = RwSignal::new(Option::<String>::None);
    let (loading, set_loading) = signal(false);

    Effect::new(move |_| {
        if result.get().is_some() || error.get().is_some() {
            set_loading.set(false);
        }
    });

    let ready = move || user.with(|u| u.as_ref().is_some_and(|u| u.has_complete_profile()));

    let calculate = move |_| {
        set_loading.set(true);
        submit(&api, CalorieCalculation, error, move |r| result.set(Some(r)));
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title"><Activity attr:class="h-5 w-5 text-primary" />"Calorie Calculator"</h2>
                <p class="text-sm text-base-content/70">
                    "Calculate your daily calorie needs based on your profile, activity level, and goals."
                </p>
                <button
                    class="btn btn-primary mt-2"
                    disabled=move || loading.get() || !ready()
                    on:click=calculate
                >
                    {move || if loading.get() { "Calculating..." } else { "Calculate Calories" }}
                </button>
                <ErrorAlert message=error />
                {move || {
                    result.get().map(|r| {
                        let m = r.macronutrient_breakdown;
                        view! {
                            <div class="divider my-2"></div>
                            <div class="stats stats-vertical sm:stats-horizontal bg-base-200">
                                <div class="stat p-3">
                                    <div class="stat-title">"BMR"</div>
                                    <div class="stat-value text-xl">{format!("{:.0}", r.bmr)}</div>
                                </div>
                                <div class="stat p-3">
                                    <div class="stat-title">"TDEE"</div>
                                    <div class="stat-value text-xl">{format!("{:.0}", r.tdee)}</div>
                                </div>
                                <div class="stat p-3">
                                    <div class="stat-title">"Daily Goal"</div>
                                    <div class="stat-value text-xl text-primary">{format!("{:.0}", r.calorie_goal)}</div>
                                </div>
                            </div>
                            <table class="table table-sm mt-2">
                                <thead>
                                    <tr><th>"Macro"</th><th class="text-right">"Grams"</th><th class="text-right">"Calories"</th></tr>
                                </thead>
                                <tbody>
                                    <MacroRow name="Protein" value=m.protein class="text-error" />
                                    <MacroRow name="Carbohydrates" value=m.carbohydrates class="text-info" />
                                    <MacroRow name="Fat" value=m.fat class="text-warning" />
                                </tbody>
                            </table>
                        }
                    })
                }}
                <Show when=move || !ready()>
                    <div role="alert" class="alert alert-info text-sm">
                        <span>"Please complete your profile (age, gender, height, weight, activity level) to use this calculator."</span>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn BodyFatCard() -> impl IntoView {
    let api = use_api();
    let result = RwSignal::new(Option::<BodyFatResult>::None);
    let error = RwSignal::new(Option::<String>::None);
    let (waist, set_waist) = signal(String::new());
    let (neck, set_neck) = signal(String::new());
    let (hip, set_hip) = signal(String::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let (Some(waist), Some(neck)) = (
            parse_opt::<f64>(&waist.get_untracked()),
            parse_opt::<f64>(&neck.get_untracked()),
        ) else {
            error.set(Some("Please enter waist and neck measurements".to_string()));
            return;
        };
        let req = BodyFatCalculation {
            waist,
            neck,
            hip: parse_opt(&hip.get_untracked()),
        };
        submit(&api, req, error, move |r| result.set(Some(r)));
    };

    view! {
        <div class="card bg-base-100 shadow md:col-span-2">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title"><Heart attr:class="h-5 w-5 text-primary" />"Body Fat Calculator"</h2>
                <p class="text-sm text-base-content/70">
                    "Estimate body fat percentage from circumference measurements (U.S. Navy method). Hip is required for women."
                </p>
                <div class="grid sm:grid-cols-3 gap-3">
                    <label class="form-control">
                        <span class="label-text mb-1">"Waist (cm)"</span>
                        <input type="number" step="0.1" class="input input-bordered" prop:value=waist
                            on:input=move |ev| set_waist.set(event_target_value(&ev)) />
                    </label>
                    <label class="form-control">
                        <span class="label-text mb-1">"Neck (cm)"</span>
                        <input type="number" step="0.1" class="input input-bordered" prop:value=neck
                            on:input=move |ev| set_neck.set(event_target_value(&ev)) />
                    </label>
                    <label class="form-control">
                        <span class="label-text mb-1">"Hip (cm)"</span>
                        <input type="number" step="0.1" class="input input-bordered" prop:value=hip
                            on:input=move |ev| set_hip.set(event_target_value(&ev)) />
                    </label>
                </div>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary">"Calculate Body Fat"</button>
                </div>
                <ErrorAlert message=error />
                {move || {
                    result.get().map(|r| view! {
                        <div class="flex flex-wrap gap-6 items-center justify-center bg-base-200 rounded-box p-4">
                            <div class="text-center">
                                <p class="text-4xl font-bold text-primary">{format!("{:.1}%", r.body_fat_percentage)}</p>
                                <span class="badge badge-outline">{r.category.clone()}</span>
                            </div>
                            <p class="text-sm text-base-content/70">
                                {format!("Healthy range: {:.0}% - {:.0}%", r.ideal_range.min, r.ideal_range.max)}
                            </p>
                        </div>
                    })
                }}
            </form>
        </div>
    }
}

#[component]
pub fn CalculatorsPage() -> impl IntoView {
    view! {
        <PageHeader
            title="Health Calculators"
            subtitle="Calculate your BMI, calorie needs, and body fat percentage"
        />
        <div class="grid md:grid-cols-2 gap-6">
            <BmiCard />
            <CalorieCard />
            <BodyFatCard />
        </div>
    }
}
