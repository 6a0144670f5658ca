//! 受保护页面的外框：侧边导航 + 顶栏

use leptos::prelude::*;
use leptos::task::spawn_local;
use panelworks_shared::MasterKind;

use crate::api::use_api;
use crate::auth::{logout, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

struct NavItem {
    label: &'static str,
    route: AppRoute,
}

fn nav_items() -> Vec<NavItem> {
    let mut items = vec![
        NavItem {
            label: "Dashboard",
            route: AppRoute::Dashboard,
        },
        NavItem {
            label: "Customers",
            route: AppRoute::Customers,
        },
        NavItem {
            label: "Create Order",
            route: AppRoute::OrderCreate,
        },
        NavItem {
            label: "Orders",
            route: AppRoute::OrderList,
        },
    ];
    items.extend(MasterKind::ALL.into_iter().map(|kind| NavItem {
        label: kind.title(),
        route: AppRoute::MasterList(kind),
    }));
    items
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let user_name = auth.user_name();
    let (logging_out, set_logging_out) = signal(false);

    let on_logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        set_logging_out.set(true);
        spawn_local(async move {
            let client = api.get_value();
            logout(&auth, &client).await;
            set_logging_out.set(false);
        });
    };

    let section = move || router.current_route().get().section();

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200 font-sans">
            <input id="nav-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-1 gap-2">
                        <label for="nav-drawer" class="btn btn-ghost lg:hidden">"☰"</label>
                        <span class="text-xl font-semibold">"Panelworks"</span>
                    </div>
                    <div class="flex-none dropdown dropdown-end">
                        <div tabindex="0" role="button" class="btn btn-ghost">
                            {move || user_name.get()}
                        </div>
                        <ul tabindex="0" class="dropdown-content menu bg-base-100 rounded-box shadow w-52 z-10">
                            <li><Link to=AppRoute::ProfileEdit>"Edit Profile"</Link></li>
                            <li><Link to=AppRoute::ChangePassword>"Change Password"</Link></li>
                            <li>
                                <button on:click=on_logout disabled=move || logging_out.get()>
                                    "Log out"
                                </button>
                            </li>
                        </ul>
                    </div>
                </div>
                <main class="p-4 md:p-8">
                    {children()}
                </main>
            </div>
            <div class="drawer-side">
                <label for="nav-drawer" class="drawer-overlay"></label>
                <ul class="menu bg-base-100 w-64 min-h-full p-4 gap-1">
                    {nav_items()
                        .into_iter()
                        .map(|item| {
                            let route_section = item.route.section();
                            view! {
                                <li>
                                    <a
                                        href=item.route.to_path()
                                        class=move || if section() == route_section { "active" } else { "" }
                                        on:click=move |ev| {
                                            ev.prevent_default();
                                            router.go(item.route);
                                        }
                                    >
                                        {item.label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
