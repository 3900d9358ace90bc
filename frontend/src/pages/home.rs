use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::reveal::{FadeIn, ScaleIn};
use crate::pages::{Remote, fetch};
use crate::web::router::Link;
use fitlife_shared::protocol::FeaturedProducts;
use fitlife_shared::{Product, format_amount};
use leptos::prelude::*;

struct Feature {
    title: &'static str,
    description: &'static str,
}

const FEATURES: [Feature; 6] = [
    Feature {
        title: "Expert Consultations",
        description: "Connect with certified dietitians and fitness experts for personalized guidance.",
    },
    Feature {
        title: "Health Calculators",
        description: "Calculate BMI, body fat percentage, and calorie needs with our advanced tools.",
    },
    Feature {
        title: "Progress Tracking",
        description: "Monitor your health journey with detailed progress charts and analytics.",
    },
    Feature {
        title: "Health Products",
        description: "Shop for supplements, fitness equipment, and healthy snacks.",
    },
    Feature {
        title: "Appointment Booking",
        description: "Schedule and manage consultations with our easy booking system.",
    },
    Feature {
        title: "Fast Delivery",
        description: "Get your health products delivered quickly and safely.",
    },
];

const STATS: [(&str, &str); 4] = [
    ("10,000+", "Active Users"),
    ("500+", "Certified Experts"),
    ("50,000+", "Consultations Completed"),
    ("99%", "Customer Satisfaction"),
];

const TESTIMONIALS: [(&str, &str, &str); 3] = [
    (
        "Sarah Johnson",
        "Lost 30 lbs",
        "FitLife360 helped me lose 30 pounds in 6 months. The expert consultations and progress tracking made all the difference!",
    ),
    (
        "Mike Chen",
        "Gained 15 lbs muscle",
        "The personalized nutrition plans and workout guidance helped me build muscle effectively.",
    ),
    (
        "Emily Davis",
        "Improved overall health",
        "I love how easy it is to book consultations and track my progress. Highly recommended!",
    ),
];

fn feature_icon(index: usize) -> AnyView {
    let class = "h-8 w-8";
    match index {
        0 => view! { <Stethoscope attr:class=class /> }.into_any(),
        1 => view! { <Calculator attr:class=class /> }.into_any(),
        2 => view! { <TrendingUp attr:class=class /> }.into_any(),
        3 => view! { <ShoppingCart attr:class=class /> }.into_any(),
        4 => view! { <Calendar attr:class=class /> }.into_any(),
        _ => view! { <Package attr:class=class /> }.into_any(),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let featured = Remote::<Vec<Product>>::new();
    fetch(&api, FeaturedProducts, featured);

    let cta = move || match auth.state.with(|s| s.role()) {
        Some(role) => (role.home_path(), "Go to Dashboard"),
        None => ("/register", "Get Started"),
    };

    view! {
        <div>
            <section class="hero min-h-[70vh] bg-gradient-to-br from-primary to-secondary text-primary-content">
                <div class="hero-content text-center">
                    <FadeIn class="max-w-2xl">
                        <div class="w-20 h-20 mx-auto mb-6 rounded-full bg-base-100/20 flex items-center justify-center text-3xl font-bold">
                            "FL"
                        </div>
                        <h1 class="text-5xl font-bold">"Transform Your Health Journey"</h1>
                        <p class="py-6 text-lg opacity-90">
                            "Connect with experts, track your progress, and achieve your weight management goals"
                        </p>
                        <div class="flex gap-4 justify-center">
                            {move || {
                                let (to, label) = cta();
                                view! { <Link to=to class="btn btn-lg bg-base-100 text-primary border-none">{label}</Link> }
                            }}
                            <Link to="/consultants" class="btn btn-lg btn-outline text-primary-content">
                                "Find an Expert"
                            </Link>
                        </div>
                    </FadeIn>
                </div>
            </section>

            <section class="max-w-6xl mx-auto px-4 -mt-12 relative z-10">
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    {STATS
                        .iter()
                        .enumerate()
                        .map(|(i, (number, label))| {
                            view! {
                                <ScaleIn delay=(i as u32) * 100 class="card bg-base-100 shadow-xl">
                                    <div class="card-body items-center text-center p-6">
                                        <span class="text-3xl font-bold text-primary">{*number}</span>
                                        <span class="text-base-content/70">{*label}</span>
                                    </div>
                                </ScaleIn>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="max-w-6xl mx-auto px-4 py-20">
                <FadeIn class="text-center mb-12">
                    <h2 class="text-4xl font-bold">"Everything You Need"</h2>
                    <p class="text-base-content/70 mt-2">"Comprehensive tools and expert guidance for your wellness journey"</p>
                </FadeIn>
                <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-6">
                    {FEATURES
                        .iter()
                        .enumerate()
                        .map(|(i, feature)| {
                            view! {
                                <FadeIn delay=(i as u32) * 100 class="card bg-base-100 shadow hover:shadow-xl">
                                    <div class="card-body">
                                        <div class="text-primary">{feature_icon(i)}</div>
                                        <h3 class="card-title">{feature.title}</h3>
                                        <p class="text-base-content/70">{feature.description}</p>
                                    </div>
                                </FadeIn>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <Show when=move || featured.data.with(|d| d.as_ref().is_some_and(|p| !p.is_empty()))>
                <section class="max-w-6xl mx-auto px-4 pb-20">
                    <FadeIn class="flex items-end justify-between mb-6">
                        <h2 class="text-3xl font-bold">"Featured Products"</h2>
                        <Link to="/products" class="link link-primary">"View all"</Link>
                    </FadeIn>
                    <div class="grid sm:grid-cols-2 lg:grid-cols-4 gap-6">
                        <For
                            each=move || featured.value()
                            key=|p| p.id
                            children=move |product: Product| {
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body">
                                            <span class="badge badge-ghost">{product.category.clone()}</span>
                                            <h3 class="card-title text-base">{product.name.clone()}</h3>
                                            <p class="text-primary font-bold">{format!("₹{}", format_amount(product.price))}</p>
                                            <Link to=format!("/products/{}", product.id) class="btn btn-sm btn-outline btn-primary">
                                                "View"
                                            </Link>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </section>
            </Show>

            <section class="bg-base-100 py-20">
                <div class="max-w-6xl mx-auto px-4">
                    <FadeIn class="text-center mb-12">
                        <h2 class="text-4xl font-bold">"Success Stories"</h2>
                    </FadeIn>
                    <div class="grid md:grid-cols-3 gap-6">
                        {TESTIMONIALS
                            .iter()
                            .enumerate()
                            .map(|(i, (name, result, text))| {
                                view! {
                                    <FadeIn delay=(i as u32) * 150 class="card bg-base-200">
                                        <div class="card-body">
                                            <div class="text-warning">"★★★★★"</div>
                                            <p class="italic">{format!("\"{text}\"")}</p>
                                            <div class="mt-4">
                                                <p class="font-bold">{*name}</p>
                                                <p class="text-sm text-base-content/60">{*result}</p>
                                            </div>
                                        </div>
                                    </FadeIn>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </section>

            <section class="py-20 text-center">
                <ScaleIn>
                    <h2 class="text-4xl font-bold">"Ready to Start Your Journey?"</h2>
                    <p class="text-base-content/70 my-4">"Join thousands of people transforming their health with FitLife360"</p>
                    {move || {
                        let (to, label) = cta();
                        view! { <Link to=to class="btn btn-primary btn-lg">{label}</Link> }
                    }}
                </ScaleIn>
            </section>
        </div>
    }
}
