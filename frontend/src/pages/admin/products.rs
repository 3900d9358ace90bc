use super::{Editing, upsert};
use crate::api::use_api;
use crate::components::alert::{ErrorAlert, Notice, Toast};
use crate::components::card::PageHeader;
use crate::components::form::{CheckboxField, TextAreaField, TextField};
use crate::components::icons::{Package, Pencil, Plus, Search, Trash};
use crate::components::modal::{Modal, confirm};
use crate::components::pagination::Pagination;
use crate::components::spinner::{EmptyRow, PageSpinner};
use crate::pages::{Remote, fetch, non_empty, parse_opt, submit};
use fitlife_shared::catalog::ProductInput;
use fitlife_shared::listing::{matches_search, paginate, total_pages};
use fitlife_shared::protocol::{AdminListProducts, CreateProduct, DeleteProduct, UpdateProduct};
use fitlife_shared::{DEFAULT_PAGE_SIZE, Product, format_amount};
use leptos::prelude::*;

#[derive(Clone, Copy)]
struct ProductForm {
    name: RwSignal<String>,
    category: RwSignal<String>,
    price: RwSignal<String>,
    stock_quantity: RwSignal<String>,
    description: RwSignal<String>,
    image_url: RwSignal<String>,
    ingredients: RwSignal<String>,
    nutritional_info: RwSignal<String>,
    is_active: RwSignal<bool>,
}

impl ProductForm {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            stock_quantity: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            image_url: RwSignal::new(String::new()),
            ingredients: RwSignal::new(String::new()),
            nutritional_info: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
        }
    }

    fn load(&self, input: ProductInput) {
        self.name.set(input.name);
        self.category.set(input.category);
        self.price.set(if input.price > 0.0 { input.price.to_string() } else { String::new() });
        self.stock_quantity.set(input.stock_quantity.to_string());
        self.description.set(input.description);
        self.image_url.set(input.image_url.unwrap_or_default());
        self.ingredients.set(input.ingredients.unwrap_or_default());
        self.nutritional_info.set(input.nutritional_info.unwrap_or_default());
        self.is_active.set(input.is_active.unwrap_or(true));
    }

    fn reset(&self) {
        self.load(ProductInput::default());
    }

    fn to_input(&self) -> Result<ProductInput, &'static str> {
        let name = self.name.get_untracked().trim().to_string();
        let category = self.category.get_untracked().trim().to_string();
        if name.is_empty() || category.is_empty() {
            return Err("Product name and category are required");
        }
        let price = parse_opt::<f64>(&self.price.get_untracked())
            .filter(|p| *p > 0.0)
            .ok_or("Price must be greater than zero")?;
        let stock_quantity = match self.stock_quantity.with_untracked(|s| s.trim().is_empty()) {
            true => 0,
            false => parse_opt(&self.stock_quantity.get_untracked()).ok_or("Stock quantity must be a whole number")?,
        };
        Ok(ProductInput {
            name,
            description: self.description.get_untracked().trim().to_string(),
            category,
            price,
            stock_quantity,
            image_url: non_empty(self.image_url.get_untracked()),
            ingredients: non_empty(self.ingredients.get_untracked()),
            nutritional_info: non_empty(self.nutritional_info.get_untracked()),
            is_active: Some(self.is_active.get_untracked()),
        })
    }
}

#[component]
fn ProductDialog(
    open: RwSignal<bool>,
    editing: RwSignal<Editing>,
    form: ProductForm,
    products: Remote<Vec<Product>>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = match form.to_input() {
            Ok(input) => input,
            Err(msg) => {
                error.set(Some(msg.to_string()));
                return;
            }
        };
        let on_saved = move |saved: Product, text: &'static str| {
            products.patch(|list| upsert(list, saved, |p| p.id));
            open.set(false);
            form.reset();
            notice.set(Some(Notice::success(text)));
        };
        match editing.get_untracked() {
            Editing::New => submit(&api, CreateProduct(input), error, move |p| {
                on_saved(p, "Product created successfully")
            }),
            Editing::Existing(id) => submit(&api, UpdateProduct { id, input }, error, move |p| {
                on_saved(p, "Product updated successfully")
            }),
        }
    };

    view! {
        <Modal open=open title=Signal::derive(move || editing.get().title("Product")) class="max-w-3xl">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <ErrorAlert message=error />
                <div class="grid sm:grid-cols-2 gap-3">
                    <TextField label="Product Name" value=form.name required=true />
                    <TextField label="Category" value=form.category required=true />
                    <TextField label="Price" value=form.price kind="number" required=true />
                    <TextField label="Stock Quantity" value=form.stock_quantity kind="number" />
                </div>
                <TextAreaField label="Description" value=form.description />
                <TextField label="Image URL" value=form.image_url kind="url" />
                <div class="grid sm:grid-cols-2 gap-3">
                    <TextAreaField label="Ingredients" value=form.ingredients rows=2 />
                    <TextAreaField label="Nutritional Information" value=form.nutritional_info rows=2 />
                </div>
                <CheckboxField label="Active" value=form.is_active />
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" class="btn btn-primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn AdminProductsPage() -> impl IntoView {
    let api = use_api();
    let products = Remote::<Vec<Product>>::new();
    fetch(&api, AdminListProducts, products);

    let (search, set_search) = signal(String::new());
    let page = RwSignal::new(1usize);
    let filtered = Memo::new(move |_| {
        let query = search.get();
        products
            .value()
            .into_iter()
            .filter(|p| matches_search(&query, &[&p.name, &p.category]))
            .collect::<Vec<_>>()
    });
    let visible = Memo::new(move |_| filtered.with(|items| paginate(items, page.get(), DEFAULT_PAGE_SIZE).items));
    let pages = Signal::derive(move || filtered.with(|items| total_pages(items.len(), DEFAULT_PAGE_SIZE)));

    let notice = RwSignal::new(Option::<Notice>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(Editing::New);
    let form = ProductForm::new();

    let open_edit = move |p: &Product| {
        form.load(ProductInput::from_product(p));
        editing.set(Editing::Existing(p.id));
        dialog_open.set(true);
    };

    let remove = Callback::new(move |id: i64| {
        if !confirm("Are you sure you want to delete this product?") {
            return;
        }
        submit(&api, DeleteProduct { id }, action_error, move |_| {
            products.patch(|list| list.retain(|p| p.id != id));
            notice.set(Some(Notice::success("Product deleted successfully")));
        });
    });

    view! {
        <Toast notice=notice />
        <PageHeader title="Product Management" subtitle="Manage the supplement and wellness catalogue">
            <button
                class="btn btn-primary gap-2"
                on:click=move |_| {
                    form.reset();
                    editing.set(Editing::New);
                    dialog_open.set(true);
                }
            >
                <Plus attr:class="h-4 w-4" />
                "Add Product"
            </button>
        </PageHeader>
        <ErrorAlert message=products.error />
        <ErrorAlert message=action_error />

        <label class="input input-bordered flex items-center gap-2 mb-4">
            <Search attr:class="h-4 w-4 opacity-60" />
            <input
                type="search"
                class="grow"
                placeholder="Search products"
                prop:value=search
                on:input=move |ev| {
                    set_search.set(event_target_value(&ev));
                    page.set(1);
                }
            />
        </label>

        <Show when=move || !products.is_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Product"</th>
                            <th>"Category"</th>
                            <th>"Price"</th>
                            <th>"Stock"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || visible.with(Vec::is_empty)>
                            <EmptyRow colspan=6 text="No products found" />
                        </Show>
                        <For
                            each=move || visible.get()
                            key=|p| (p.id, p.name.clone(), p.price.to_bits(), p.stock_quantity, p.is_active)
                            children=move |p: Product| {
                                let id = p.id;
                                let stored = StoredValue::new(p.clone());
                                view! {
                                    <tr class="hover">
                                        <td>
                                            <div class="flex items-center gap-3">
                                                <div class="w-12 h-12 rounded bg-base-200 flex items-center justify-center overflow-hidden">
                                                    {match p.image_url.clone() {
                                                        Some(src) => view! { <img src=src alt=p.name.clone() class="object-cover w-full h-full" /> }.into_any(),
                                                        None => view! { <Package attr:class="h-6 w-6 opacity-40" /> }.into_any(),
                                                    }}
                                                </div>
                                                <span class="font-semibold">{p.name.clone()}</span>
                                            </div>
                                        </td>
                                        <td><span class="badge badge-ghost">{p.category.clone()}</span></td>
                                        <td>{format!("₹{}", format_amount(p.price))}</td>
                                        <td class:text-error=!p.in_stock()>{p.stock_quantity}</td>
                                        <td>
                                            <span class={if p.is_active { "badge badge-success" } else { "badge badge-ghost" }}>
                                                {if p.is_active { "Active" } else { "Inactive" }}
                                            </span>
                                        </td>
                                        <td>
                                            <div class="flex gap-1">
                                                <button class="btn btn-ghost btn-xs" title="Edit" on:click=move |_| stored.with_value(|p| open_edit(p))>
                                                    <Pencil attr:class="h-4 w-4" />
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
            </div>
            <Pagination page=page total_pages=pages />
        </Show>

        <ProductDialog open=dialog_open editing=editing form=form products=products notice=notice />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_form_validation() {
        let owner = Owner::new();
        owner.set();

        let form = ProductForm::new();
        form.name.set("Whey Protein".into());
        form.category.set("supplements".into());
        assert_eq!(form.to_input(), Err("Price must be greater than zero"));

        form.price.set("1499".into());
        form.image_url.set("  ".into());
        let input = form.to_input().unwrap();
        assert_eq!(input.price, 1499.0);
        assert_eq!(input.stock_quantity, 0);
        assert_eq!(input.image_url, None);
        assert_eq!(input.is_active, Some(true));

        form.stock_quantity.set("2.5".into());
        assert_eq!(form.to_input(), Err("Stock quantity must be a whole number"));
    }
}
