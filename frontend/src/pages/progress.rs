use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::PageHeader;
use crate::components::icons::{Plus, TrendingUp};
use crate::components::modal::Modal;
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, non_empty, parse_opt, submit};
use fitlife_shared::health::{
    Metric, ProgressInput, ProgressRecord, chart_points, sort_chronologically, trend,
};
use fitlife_shared::protocol::{CreateProgress, ListProgress};
use leptos::prelude::*;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 160.0;

fn stroke_class(metric: Metric) -> &'static str {
    match metric {
        Metric::Weight => "stroke-success",
        Metric::BodyFat => "stroke-warning",
        Metric::MuscleMass => "stroke-info",
    }
}

/// 单项指标折线图（记录按日期升序）
#[component]
fn MetricChart(metric: Metric, records: Signal<Vec<ProgressRecord>>) -> impl IntoView {
    let series = Memo::new(move |_| {
        records.with(|list| {
            list.iter()
                .filter_map(|r| metric.value(r).map(|v| (r.date_recorded, v)))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <div class="flex justify-between items-baseline">
                    <h2 class="card-title">{metric.label()}</h2>
                    {move || records.with(|r| trend(r, metric)).map(|t| {
                        let delta = t.delta.map(|d| format!(" ({:+.1})", d)).unwrap_or_default();
                        view! {
                            <span class="text-sm text-base-content/70">
                                {format!("{:.1} {}{}", t.latest, metric.unit(), delta)}
                            </span>
                        }
                    })}
                </div>
                <Show
                    when=move || series.with(|s| !s.is_empty())
                    fallback=|| view! { <p class="text-sm text-base-content/50 py-6 text-center">"No data recorded"</p> }
                >
                    <svg
                        viewBox=format!("-8 -8 {} {}", CHART_WIDTH + 16.0, CHART_HEIGHT + 16.0)
                        class="w-full h-40"
                        preserveAspectRatio="none"
                    >
                        <polyline
                            fill="none"
                            stroke-width="2"
                            class=stroke_class(metric)
                            points=move || {
                                let values: Vec<f64> = series.with(|s| s.iter().map(|(_, v)| *v).collect());
                                chart_points(&values, CHART_WIDTH, CHART_HEIGHT)
                            }
                        />
                    </svg>
                    <div class="flex justify-between text-xs text-base-content/50">
                        <span>{move || series.with(|s| s.first().map(|(d, _)| d.format_date()).unwrap_or_default())}</span>
                        <span>{move || series.with(|s| s.last().map(|(d, _)| d.format_date()).unwrap_or_default())}</span>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn ProgressPage() -> impl IntoView {
    let api = use_api();
    let remote = Remote::<Vec<ProgressRecord>>::new();
    fetch(&api, ListProgress, remote);

    let open = RwSignal::new(false);
    let notice = RwSignal::new(Option::<Notice>::None);
    let form_error = RwSignal::new(Option::<String>::None);
    let (weight, set_weight) = signal(String::new());
    let (body_fat, set_body_fat) = signal(String::new());
    let (muscle, set_muscle) = signal(String::new());
    let (measurements, set_measurements) = signal(String::new());
    let (notes, set_notes) = signal(String::new());

    let chronological = Signal::derive(move || {
        let mut records = remote.value();
        sort_chronologically(&mut records);
        records
    });

    let reset_form = move || {
        for set in [set_weight, set_body_fat, set_muscle, set_measurements, set_notes] {
            set.set(String::new());
        }
        form_error.set(None);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = ProgressInput {
            weight: parse_opt(&weight.get_untracked()),
            body_fat_percentage: parse_opt(&body_fat.get_untracked()),
            muscle_mass: parse_opt(&muscle.get_untracked()),
            measurements: non_empty(measurements.get_untracked()),
            notes: non_empty(notes.get_untracked()),
        };
        if input.is_empty() {
            form_error.set(Some("Enter at least one measurement".to_string()));
            return;
        }
        submit(&api, CreateProgress(input), form_error, move |record| {
            remote.patch(|list| list.push(record));
            open.set(false);
            reset_form();
            notice.set(Some(Notice::success("Progress entry added successfully!")));
        });
    };

    let add_button = move |label: &'static str| {
        view! {
            <button class="btn btn-primary gap-2" on:click=move |_| open.set(true)>
                <Plus attr:class="h-4 w-4" />
                {label}
            </button>
        }
    };

    view! {
        <Toast notice=notice />
        <PageHeader title="Progress Tracking" subtitle="Monitor your health journey with detailed progress charts">
            {add_button("Add Progress Entry")}
        </PageHeader>
        <ErrorAlert message=remote.error />

        <Show when=move || !remote.is_loading() fallback=|| view! { <PageSpinner /> }>
            <Show
                when=move || !chronological.with(Vec::is_empty)
                fallback=move || view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center text-center py-16">
                            <TrendingUp attr:class="h-16 w-16 text-base-content/30" />
                            <h2 class="text-2xl font-bold">"No progress data yet"</h2>
                            <p class="text-base-content/70 mb-4">"Start tracking your progress to see charts and analytics"</p>
                            {add_button("Add First Entry")}
                        </div>
                    </div>
                }
            >
                <div class="grid md:grid-cols-2 gap-6">
                    <div class="md:col-span-2">
                        <MetricChart metric=Metric::Weight records=chronological />
                    </div>
                    <MetricChart metric=Metric::BodyFat records=chronological />
                    <MetricChart metric=Metric::MuscleMass records=chronological />
                </div>

                <div class="card bg-base-100 shadow mt-6">
                    <div class="card-body">
                        <h2 class="card-title">"History"</h2>
                        <div class="overflow-x-auto">
                            <table class="table table-zebra">
                                <thead>
                                    <tr>
                                        <th>"Date"</th>
                                        <th>"Weight (kg)"</th>
                                        <th>"Body Fat (%)"</th>
                                        <th>"Muscle Mass (kg)"</th>
                                        <th>"Notes"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || { let mut r = chronological.get(); r.reverse(); r }
                                        key=|r| r.id
                                        children=|r: ProgressRecord| {
                                            let cell = |v: Option<f64>| v.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".into());
                                            view! {
                                                <tr>
                                                    <td>{r.date_recorded.format_date()}</td>
                                                    <td>{cell(r.weight)}</td>
                                                    <td>{cell(r.body_fat_percentage)}</td>
                                                    <td>{cell(r.muscle_mass)}</td>
                                                    <td class="max-w-xs truncate">{r.notes.clone().unwrap_or_default()}</td>
                                                </tr>
                                            }
                                        }
                                    />
                                    <Show when=move || chronological.with(Vec::is_empty)>
                                        <EmptyRow colspan=5 text="No entries" />
                                    </Show>
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </Show>
        </Show>

        <Modal open=open title="Add Progress Entry">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=form_error />
                <div class="grid sm:grid-cols-3 gap-3">
                    <label class="form-control">
                        <span class="label-text mb-1">"Weight (kg)"</span>
                        <input type="number" step="0.1" class="input input-bordered" prop:value=weight
                            on:input=move |ev| set_weight.set(event_target_value(&ev)) />
                    </label>
                    <label class="form-control">
                        <span class="label-text mb-1">"Body Fat Percentage"</span>
                        <input type="number" step="0.1" class="input input-bordered" prop:value=body_fat
                            on:input=move |ev| set_body_fat.set(event_target_value(&ev)) />
                    </label>
                    <label class="form-control">
                        <span class="label-text mb-1">"Muscle Mass (kg)"</span>
                        <input type="number" step="0.1" class="input input-bordered" prop:value=muscle
                            on:input=move |ev| set_muscle.set(event_target_value(&ev)) />
                    </label>
                </div>
                <label class="form-control">
                    <span class="label-text mb-1">"Measurements (JSON)"</span>
                    <textarea class="textarea textarea-bordered" rows="2" placeholder=r#"{"waist": 80, "chest": 95}"#
                        prop:value=measurements on:input=move |ev| set_measurements.set(event_target_value(&ev))></textarea>
                </label>
                <label class="form-control">
                    <span class="label-text mb-1">"Notes"</span>
                    <textarea class="textarea textarea-bordered" rows="2"
                        prop:value=notes on:input=move |ev| set_notes.set(event_target_value(&ev))></textarea>
                </label>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary">"Save Entry"</button>
                </div>
            </form>
        </Modal>
    }
}
