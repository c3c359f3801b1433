use std::process::Command;

fn main() {
    // Only rebuild CSS when template or CSS files change
    println!("cargo:rerun-if-changed=assets/css/input.css");
    println!("cargo:rerun-if-changed=templates/");

    // Try to run Tailwind CSS standalone CLI
    let status = Command::new("tailwindcss")
        .args([
            "-i",
            "assets/css/input.css",
            "-o",
            "assets/css/output.css",
            "--minify",
        ])
        .status();

    match status {
        Ok(s) if s.success() => {
            println!("cargo:warning=Tailwind CSS compiled successfully");
        }
        _ => {
            // Tailwind CLI not available - write a minimal fallback stylesheet
            let fallback = r#"*, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, sans-serif; line-height: 1.6; color: #1c1917; background: #fafaf9; -webkit-font-smoothing: antialiased; }
a { color: inherit; text-decoration: none; }
a:hover { opacity: 0.8; }
.container { max-width: 64rem; margin: 0 auto; padding: 0 1rem 3rem; }
.page-header { display: flex; align-items: center; justify-content: space-between; padding: 1rem 0; margin-bottom: 2rem; border-bottom: 1px solid #e7e5e4; }
.page-header h1 { font-size: 1.25rem; font-weight: 600; }
.page-header nav { display: flex; align-items: center; gap: 0.75rem; }
.inline { display: inline; }
.btn { display: inline-flex; align-items: center; justify-content: center; padding: 0.5rem 1rem; border-radius: 0.5rem; font-size: 0.875rem; font-weight: 500; transition: all 0.15s; cursor: pointer; text-decoration: none; }
.btn-primary { background: #1c1917; color: #fff; border: none; }
.btn-primary:hover { background: #44403c; }
.btn-secondary { background: #fff; color: #1c1917; border: 1px solid #d6d3d1; }
.btn-secondary:hover { background: #f5f5f4; }
.btn-danger { background: #b91c1c; color: #fff; border: none; }
.card { background: #fff; border-radius: 0.75rem; border: 1px solid #e7e5e4; padding: 1.5rem; box-shadow: 0 1px 2px 0 rgb(0 0 0 / 0.05); }
.card-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; margin-bottom: 2rem; }
.card-head { display: flex; gap: 1rem; margin-bottom: 1rem; }
.card-foot { display: flex; align-items: center; justify-content: space-between; margin-top: 1rem; padding-top: 1rem; border-top: 1px solid #f5f5f4; }
.stack { display: flex; flex-direction: column; gap: 1rem; margin-bottom: 2rem; }
.avatar { display: inline-flex; align-items: center; justify-content: center; width: 2rem; height: 2rem; border-radius: 9999px; background: #e7e5e4; font-weight: 600; }
.avatar-lg { width: 3.5rem; height: 3.5rem; font-size: 1.25rem; }
img.avatar { object-fit: cover; }
.muted { color: #78716c; font-size: 0.875rem; }
.label { font-size: 0.875rem; font-weight: 500; margin: 0.5rem 0 0.25rem; }
.label-offer { color: #15803d; }
.label-want { color: #1d4ed8; }
.badges { display: flex; flex-wrap: wrap; gap: 0.375rem; }
.badge { display: inline-block; padding: 0.125rem 0.625rem; border-radius: 9999px; font-size: 0.75rem; }
.badge-offer { background: #dcfce7; color: #166534; }
.badge-want { border: 1px solid #bfdbfe; color: #1e40af; }
.badge-pending { background: #fef9c3; color: #854d0e; }
.badge-accepted { background: #dcfce7; color: #166534; }
.badge-rejected { background: #fee2e2; color: #991b1b; }
.filters { display: flex; gap: 1rem; margin-bottom: 2rem; }
.filters input[type="search"] { flex: 1; }
input, select, textarea { padding: 0.5rem 0.75rem; border: 1px solid #d6d3d1; border-radius: 0.5rem; font: inherit; background: #fff; }
textarea { width: 100%; min-height: 6rem; }
form .field { display: flex; flex-direction: column; gap: 0.25rem; margin-bottom: 1rem; }
form .field label { font-size: 0.875rem; font-weight: 500; }
.actions { display: flex; gap: 0.5rem; }
.alert { padding: 0.75rem 1rem; border-radius: 0.5rem; margin-bottom: 1rem; background: #fee2e2; color: #991b1b; }
.alert-success { background: #dcfce7; color: #166534; }
.pagination { display: flex; justify-content: center; gap: 0.5rem; }
.empty { text-align: center; color: #78716c; padding: 3rem 0; }
.auth-card { max-width: 28rem; margin: 3rem auto; }
.auth-card h2 { margin-bottom: 0.25rem; }
.auth-card .muted { margin-bottom: 1rem; }
.auth-card form { margin-bottom: 2rem; }
.message-box { background: #fafaf9; padding: 0.75rem; border-radius: 0.5rem; font-size: 0.875rem; }
"#;
            std::fs::create_dir_all("assets/css").ok();
            std::fs::write("assets/css/output.css", fallback).ok();
        }
    }
}
