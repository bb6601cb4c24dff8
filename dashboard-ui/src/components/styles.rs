pub const DASHBOARD_STYLES: &str = r#"
:root {
    --page-bg: #0f172a;
    --panel-bg: #1e293b;
    --panel-border: #334155;
    --text-primary: #f8fafc;
    --text-secondary: #94a3b8;
    --accent: #3b82f6;
    --accent-hover: #2563eb;
    --danger: #ef4444;
    --success: #10b981;
}

body {
    margin: 0;
    font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    background: var(--page-bg);
    color: var(--text-primary);
}

/* Login */
.login-page {
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
}

.login-card {
    width: 360px;
    padding: 2rem;
    background: var(--panel-bg);
    border: 1px solid var(--panel-border);
    border-radius: 12px;
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
}

.login-card h1 {
    margin: 0 0 0.5rem 0;
    font-size: 1.5rem;
}

.message {
    padding: 0.5rem 0.75rem;
    border-radius: 6px;
    font-size: 0.875rem;
}

.message.success {
    background: color-mix(in srgb, var(--success) 20%, transparent);
    color: var(--success);
}

.message.error {
    background: color-mix(in srgb, var(--danger) 20%, transparent);
    color: var(--danger);
}

.hint {
    font-size: 0.75rem;
    color: var(--text-secondary);
}

/* Form controls */
label {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
    font-size: 0.875rem;
    color: var(--text-secondary);
}

input, select {
    padding: 0.5rem 0.625rem;
    border-radius: 6px;
    border: 1px solid var(--panel-border);
    background: var(--page-bg);
    color: var(--text-primary);
    font-size: 0.875rem;
}

button {
    padding: 0.5rem 0.875rem;
    border-radius: 6px;
    border: 1px solid transparent;
    background: var(--accent);
    color: white;
    cursor: pointer;
    font-size: 0.875rem;
}

button:hover:not(:disabled) {
    background: var(--accent-hover);
}

button:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

button.secondary {
    background: transparent;
    border-color: var(--panel-border);
    color: var(--text-primary);
}

button.danger {
    background: var(--danger);
}

/* Layout */
.dashboard {
    min-height: 100vh;
    display: flex;
    flex-direction: column;
}

.dashboard-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.75rem 1.5rem;
    background: var(--panel-bg);
    border-bottom: 1px solid var(--panel-border);
}

.brand {
    font-weight: 700;
}

.user-box {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    color: var(--text-secondary);
}

.dashboard-main {
    flex: 1;
    padding: 1.5rem;
    max-width: 1100px;
    width: 100%;
    margin: 0 auto;
    box-sizing: border-box;
}

.breadcrumbs {
    display: flex;
    gap: 0.375rem;
    font-size: 0.8125rem;
    color: var(--text-secondary);
    margin-bottom: 0.75rem;
}

.breadcrumbs a {
    color: var(--accent);
    cursor: pointer;
}

.page-title {
    margin: 0;
    font-size: 1.75rem;
}

.page-subtitle {
    margin: 0.25rem 0 1.5rem 0;
    color: var(--text-secondary);
}

/* Panels */
.panel {
    background: var(--panel-bg);
    border: 1px solid var(--panel-border);
    border-radius: 10px;
    padding: 1.25rem;
    margin-bottom: 1rem;
}

.panel-actions {
    display: flex;
    gap: 0.5rem;
    margin-top: 1rem;
}

.home-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
    gap: 1rem;
}

.home-card {
    cursor: pointer;
}

.home-card h3 {
    margin: 0 0 0.375rem 0;
}

/* Product list */
.product-list {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
}

.product-row {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.75rem 1rem;
    background: var(--panel-bg);
    border: 1px solid var(--panel-border);
    border-radius: 8px;
}

.product-row.selectable {
    cursor: pointer;
}

.product-row.selectable:hover {
    border-color: var(--accent);
}

.product-meta {
    font-size: 0.8125rem;
    color: var(--text-secondary);
}

.loading, .empty-state {
    padding: 2rem;
    text-align: center;
    color: var(--text-secondary);
}

/* Parameters and values */
.parameter-row {
    display: grid;
    grid-template-columns: 2fr 1fr 2fr auto;
    gap: 0.5rem;
    align-items: end;
    padding: 0.5rem 0;
    border-bottom: 1px solid var(--panel-border);
}

.row-actions {
    display: flex;
    gap: 0.375rem;
}

table {
    width: 100%;
    border-collapse: collapse;
    font-size: 0.875rem;
}

th, td {
    text-align: left;
    padding: 0.5rem;
    border-bottom: 1px solid var(--panel-border);
}

th {
    color: var(--text-secondary);
    font-weight: 600;
}

.value-form {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
    gap: 0.75rem;
}
"#;
