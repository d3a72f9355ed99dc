//! Built-in templates

pub const MENU_TEMPLATE_NAME: &str = "menu";
pub const MENU_NODE_PARTIAL_NAME: &str = "menu_node";
pub const PAGE_TEMPLATE_NAME: &str = "page";

pub const MENU_TEMPLATE: &str = r#"<nav class="menu" data-menu="{{menu_name}}">
{{#if nodes}}<ul class="menu-root">
{{#each nodes}}{{> menu_node}}{{/each}}</ul>
{{/if}}</nav>
"#;

// Collapsed branches are still emitted so dropdowns can open them on hover.
pub const MENU_NODE_PARTIAL: &str = r#"<li class="menu-item level-{{level}}{{#if active}} active{{/if}}{{#if expanded}} expanded{{/if}}">
<a href="{{href}}"{{#if active}} aria-current="page"{{/if}}>{{title}}</a>
{{#if children}}<ul class="submenu{{#if expanded}} open{{/if}}">
{{#each children}}{{> menu_node}}{{/each}}</ul>
{{/if}}</li>
"#;

pub const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{current_path}}</title>
</head>
<body>
{{#each menus}}<div class="menu-slot" id="menu-{{name}}">
{{{html}}}</div>
{{/each}}</body>
</html>
"#;
