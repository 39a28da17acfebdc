//! Bootstrap-style markup for form and table view-models
//!
//! Every value a view-model carries is already [`Html`](crate::Html), so
//! templates render with autoescaping off.
//!
//! `readonly` does not apply to `<select>`, so read-only choice widgets are
//! rendered `disabled` and their selected keys are posted through hidden
//! inputs instead.

use crate::libs::error::Result;
use crate::libs::escape::Html;
use crate::libs::form::FormViewModel;
use crate::libs::table::TableViewModel;
use tera::{Context, Tera};

const FORM_TEMPLATE: &str = r#"<form method="POST" action="{{ action }}" class="p-4 border rounded" id="{{ form.table }}_form">
<div class="row">
{%- for field in form.fields %}
<div class="col-md-{{ field.width }}"><div class="form-group">
<label for="{{ field.name }}">{{ field.spec.label }}</label>
{%- if field.spec.kind == "multiselect" %}
<select class="form-control{% if field.enhanced %} select2{% endif %}" name="{{ field.name }}[]" id="{{ field.name }}" multiple{% if field.spec.readonly %} disabled{% endif %}>
{%- for option in field.value.options %}
<option value="{{ option.key }}"{% if option.selected %} selected{% endif %}>{{ option.label }}</option>
{%- endfor %}
</select>
{%- if field.spec.readonly %}{% for option in field.value.options %}{% if option.selected %}
<input type="hidden" name="{{ field.name }}[]" value="{{ option.key }}">
{%- endif %}{% endfor %}{% endif %}
{%- elif field.spec.kind == "select" %}
<select class="form-control{% if field.enhanced %} select2{% endif %}" name="{{ field.name }}" id="{{ field.name }}"{% if field.spec.readonly %} disabled{% endif %}>
{%- for option in field.value.options %}
<option value="{{ option.key }}"{% if option.selected %} selected{% endif %}>{{ option.label }}</option>
{%- endfor %}
</select>
{%- if field.spec.readonly %}{% for option in field.value.options %}{% if option.selected %}
<input type="hidden" name="{{ field.name }}" value="{{ option.key }}">
{%- endif %}{% endfor %}{% endif %}
{%- elif field.spec.kind == "multiline_text" %}
<textarea class="form-control" name="{{ field.name }}" id="{{ field.name }}" placeholder="{{ field.spec.placeholder }}"{% if field.spec.readonly %} readonly{% endif %}>{{ field.value.text }}</textarea>
{%- else %}
<input type="{{ field.spec.kind }}" class="form-control" name="{{ field.name }}" id="{{ field.name }}" placeholder="{{ field.spec.placeholder }}" value="{{ field.value.text }}"{% if field.spec.readonly %} readonly{% endif %}>
{%- endif %}
</div></div>
{%- endfor %}
</div>
<button type="submit" class="btn btn-primary mt-3">Save</button>
</form>
"#;

const TABLE_TEMPLATE: &str = r#"<table id="data-table" class="table table-bordered">
<thead><tr>
{%- for header in table.headers %}<th>{{ header }}</th>{% endfor -%}
<th>Actions</th></tr></thead>
<tbody>
{%- for row in table.rows %}
<tr>
{%- for cell in row.cells %}<td contenteditable="{% if cell.readonly %}false{% else %}true{% endif %}">{{ cell.value }}</td>{% endfor -%}
<td><button class="btn btn-sm btn-danger verify-button" data-id="{{ row.action.row_id }}" data-table="{{ row.action.table }}">Verify</button></td>
</tr>
{%- endfor %}
</tbody>
</table>
"#;

/// Render a form posting to `action`.
pub fn render_form(form: &FormViewModel, action: &str) -> Result<String> {
    let mut context = Context::new();
    context.insert("form", form);
    context.insert("action", &Html::escape(action));
    Ok(Tera::one_off(FORM_TEMPLATE, &context, false)?)
}

pub fn render_table(table: &TableViewModel) -> Result<String> {
    let mut context = Context::new();
    context.insert("table", table);
    Ok(Tera::one_off(TABLE_TEMPLATE, &context, false)?)
}
