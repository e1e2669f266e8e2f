//! Global CSS styles for Coursepath.
//!
//! Light paper background, ink text, teal for progress and primary actions.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  --ink: #1f2a44;
  --ink-muted: rgba(31, 42, 68, 0.6);
  --paper: #fafafa;
  --card: #ffffff;
  --border: #e3e6ec;

  --teal: #1abc9c;
  --teal-dark: #16a085;
  --amber: #f39c12;
  --danger: #e74c3c;
  --info: #3498db;
  --success: #2ecc71;

  --font-sans: 'Poppins', 'Segoe UI', sans-serif;
  --radius: 10px;
  --shadow: 0 6px 24px rgba(31, 42, 68, 0.08);
}

* { box-sizing: border-box; }

body {
  margin: 0;
  font-family: var(--font-sans);
  color: var(--ink);
  background: var(--paper);
}

/* === Navbar === */
.navbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 12px 32px;
  background: var(--card);
  box-shadow: var(--shadow);
  position: sticky;
  top: 0;
  z-index: 10;
}

.app-title { font-size: 1.4rem; margin: 0; color: var(--teal-dark); }

.nav-links { display: flex; gap: 20px; }

.nav-link {
  color: var(--ink-muted);
  text-decoration: none;
  padding-bottom: 4px;
  border-bottom: 2px solid transparent;
}

.nav-link.active { color: var(--ink); border-bottom-color: var(--teal); }

.nav-profile, .nav-login { position: relative; }

.profile-image {
  display: flex;
  align-items: center;
  gap: 8px;
  border: none;
  background: none;
  cursor: pointer;
}

.sub-menu, .login.input-group {
  position: absolute;
  right: 0;
  top: 52px;
  min-width: 220px;
  padding: 16px;
  background: var(--card);
  border-radius: var(--radius);
  box-shadow: var(--shadow);
  display: flex;
  flex-direction: column;
  gap: 8px;
}

.sub-menu-link {
  border: none;
  background: none;
  text-align: left;
  color: var(--ink);
  text-decoration: none;
  cursor: pointer;
  font: inherit;
}

.password-toggle { font-size: 0.85rem; color: var(--ink-muted); }

.register { font-size: 0.85rem; color: var(--teal-dark); }

/* === Buttons === */
.btn {
  padding: 10px 22px;
  border-radius: 30px;
  border: none;
  font: inherit;
  cursor: pointer;
  transition: background 0.2s ease, opacity 0.2s ease;
}

.btn:disabled { opacity: 0.5; cursor: not-allowed; }

.btn-primary { background: var(--teal); color: #fff; }
.btn-primary:hover:not(:disabled) { background: var(--teal-dark); }

.btn-secondary { background: var(--border); color: var(--ink); }

.btn-link { background: none; color: var(--teal-dark); padding: 6px 10px; }

.close-btn {
  position: absolute;
  top: 12px;
  right: 12px;
  border: none;
  background: none;
  font-size: 1.3rem;
  cursor: pointer;
}

/* === Getting started === */
.getting-started {
  display: flex;
  justify-content: center;
  padding-top: 80px;
}

.form-box {
  position: relative;
  width: 420px;
  height: 560px;
  padding: 20px;
  overflow: hidden;
  background: var(--card);
  border-radius: var(--radius);
  box-shadow: var(--shadow);
}

.button-group {
  position: relative;
  width: 220px;
  margin: 20px auto;
  border-radius: 30px;
  box-shadow: 0 0 12px rgba(26, 188, 156, 0.25);
}

#btn {
  position: absolute;
  top: 0;
  width: 110px;
  height: 100%;
  border-radius: 30px;
  background: var(--teal);
  transition: left 0.5s ease;
}

.toggle-btn {
  position: relative;
  width: 110px;
  padding: 10px 0;
  border: none;
  background: transparent;
  cursor: pointer;
  font: inherit;
}

.input-group {
  position: absolute;
  top: 110px;
  width: 320px;
  display: flex;
  flex-direction: column;
  gap: 10px;
  transition: left 0.5s ease;
}

.input-field {
  width: 100%;
  padding: 10px 0;
  border: none;
  border-bottom: 1px solid var(--border);
  background: transparent;
  outline: none;
  font: inherit;
}

.input-field:focus { border-bottom-color: var(--teal); }
.input-field.invalid, .profile-field.invalid .input-field { border-bottom-color: var(--danger); }

.input-warning { color: var(--amber); font-size: 0.85rem; margin: 4px 0 0; }

.password-checker { font-size: 0.85rem; color: var(--ink-muted); margin: 0; }

/* === Password strength === */
.strength-container { font-size: 0.8rem; }

.strength-bar {
  height: 6px;
  border-radius: 3px;
  background: var(--border);
  overflow: hidden;
}

.strength-bar-inner { height: 100%; transition: width 0.3s ease, background 0.3s ease; }

.strength-percent { color: var(--ink-muted); }

.check { color: var(--ink-muted); }
.check.passed { color: var(--success); }

/* === Profile wizard === */
.complete-profile {
  max-width: 560px;
  margin: 60px auto;
  padding: 32px;
  background: var(--card);
  border-radius: var(--radius);
  box-shadow: var(--shadow);
}

.step-progress { margin-bottom: 24px; }

.step-count { font-size: 0.85rem; color: var(--ink-muted); }

.progress-bar {
  position: relative;
  display: flex;
  justify-content: space-between;
  width: 400px;
  margin-top: 10px;
}

.progress-bar::before {
  content: "";
  position: absolute;
  top: 50%;
  left: 0;
  width: 100%;
  height: 4px;
  transform: translateY(-50%);
  background: var(--border);
}

.progress-bar-fill {
  position: absolute;
  top: 50%;
  left: 0;
  height: 4px;
  transform: translateY(-50%);
  background: var(--teal);
  transition: width 0.4s ease;
}

.progress-dot {
  position: relative;
  width: 14px;
  height: 14px;
  border-radius: 50%;
  background: var(--border);
  transition: background 0.4s ease;
}

.progress-dot.reached { background: var(--teal); }

.greeting-title { margin: 0 0 6px; }
.sub-greeting { margin: 0 0 20px; color: var(--ink-muted); }

.radio-cards { display: flex; gap: 16px; }

.radio-card {
  flex: 1;
  padding: 16px;
  border: 2px solid var(--border);
  border-radius: var(--radius);
  text-align: center;
  cursor: pointer;
}

.radio-card.checked { border-color: var(--teal); background: rgba(26, 188, 156, 0.08); }

.radio-card input { display: none; }

.dropdown { position: relative; }

.dropdown-selected {
  padding: 10px 14px;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  cursor: pointer;
}

.dropdown-options {
  display: none;
  position: absolute;
  left: 0;
  right: 0;
  margin: 4px 0 0;
  padding: 6px 0;
  list-style: none;
  background: var(--card);
  border-radius: var(--radius);
  box-shadow: var(--shadow);
  z-index: 5;
}

.dropdown.open .dropdown-options { display: block; }

.dropdown-options li { padding: 8px 14px; cursor: pointer; }
.dropdown-options li:hover { background: var(--paper); }

.wizard-nav { display: flex; justify-content: space-between; margin-top: 28px; }

/* === Loader === */
.loader-overlay {
  position: fixed;
  inset: 0;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  gap: 16px;
  background: rgba(250, 250, 250, 0.92);
  z-index: 50;
}

.loader-spinner {
  width: 48px;
  height: 48px;
  border: 4px solid var(--border);
  border-top-color: var(--teal);
  border-radius: 50%;
  animation: spin 1s linear infinite;
}

.loader-message { color: var(--ink-muted); }

@keyframes spin { to { transform: rotate(360deg); } }

/* === Progress ring === */
.progress-ring-track { stroke: var(--border); }
.progress-ring-fill {
  stroke: var(--teal);
  transform: rotate(-90deg);
  transform-origin: 50% 50%;
  transition: stroke-dashoffset 1s ease;
}

/* === Progress wave === */
.progress-wave {
  position: relative;
  width: 140px;
  height: 140px;
  border-radius: 50%;
  overflow: hidden;
}

.wave-fill {
  position: absolute;
  left: 0;
  bottom: 0;
  width: 100%;
  background: rgba(26, 188, 156, 0.55);
  transition: height 1s ease, opacity 0.3s ease;
  pointer-events: none;
}

.wave-percent {
  position: absolute;
  inset: 0;
  display: flex;
  align-items: center;
  justify-content: center;
  color: #fff;
  font-size: 1.6rem;
  font-weight: 600;
  transition: opacity 0.3s ease;
  pointer-events: none;
}

.progress-wave.rising .wave-fill, .progress-wave.falling .wave-fill { will-change: height; }

/* === Courses === */
.courses { max-width: 860px; margin: 32px auto; padding: 0 24px; }

.search-input-wrapper { display: flex; align-items: center; gap: 8px; margin-bottom: 24px; }

.course-list { display: flex; flex-direction: column; gap: 16px; }

.course-item {
  display: grid;
  grid-template-columns: 1fr auto;
  align-items: center;
  padding: 18px 22px;
  background: var(--card);
  border-radius: var(--radius);
  box-shadow: var(--shadow);
}

.course-name { margin: 0; grid-column: 1; }
.course-description { margin: 4px 0 0; grid-column: 1; color: var(--ink-muted); }
.course-item .btn { grid-column: 2; grid-row: 1 / span 2; }

.empty-state { color: var(--ink-muted); text-align: center; }

.overlay-popup {
  position: fixed;
  inset: 0;
  background: rgba(31, 42, 68, 0.4);
  opacity: 0;
  z-index: 40;
}

.overlay-popup.open { opacity: 1; }
.overlay-popup.closing { opacity: 0; transition: opacity 500ms ease; }

.popup-after-auth {
  position: absolute;
  left: 50%;
  top: -50%;
  width: 380px;
  padding: 32px;
  transform: translate(-50%, -50%);
  background: var(--card);
  border-radius: var(--radius);
  text-align: center;
  transition: top 0.5s ease;
}

.popup-after-auth.shown { top: 50%; }

/* === Profile === */
.profile {
  display: grid;
  grid-template-columns: 260px 1fr;
  gap: 24px;
  max-width: 900px;
  margin: 32px auto;
  padding: 0 24px;
}

.profile-card, .profile-details {
  padding: 24px;
  background: var(--card);
  border-radius: var(--radius);
  box-shadow: var(--shadow);
}

.profile-card { display: flex; flex-direction: column; align-items: center; gap: 10px; }

.profile-photo { width: 100%; height: 100%; object-fit: cover; }

.profile-joined { color: var(--ink-muted); font-size: 0.85rem; margin: 0; }

.image-actions { display: flex; flex-wrap: wrap; gap: 8px; justify-content: center; }

.profile-details dl { display: grid; grid-template-columns: 140px 1fr; row-gap: 8px; }
.profile-details dt { color: var(--ink-muted); }
.profile-details dd { margin: 0; }

.profile-field {
  display: grid;
  grid-template-columns: 140px 1fr;
  align-items: center;
  padding: 8px 0;
  border-bottom: 1px solid var(--border);
}

.profile-field label { color: var(--ink-muted); }

.field-display { cursor: text; }
.profile-field.invalid .field-display { color: var(--danger); }

.social-link { display: inline-block; margin: 12px 0; color: var(--teal-dark); }

/* === Notifications === */
.notification-area {
  position: fixed;
  top: 20px;
  right: 20px;
  display: flex;
  flex-direction: column;
  gap: 10px;
  z-index: 100;
}

.notification-box {
  position: relative;
  min-width: 280px;
  padding: 14px 18px;
  overflow: hidden;
  background: var(--card);
  border-radius: var(--radius);
  box-shadow: var(--shadow);
  border-left: 4px solid var(--info);
  cursor: pointer;
}

.notification-box.error { border-left-color: var(--danger); }
.notification-box.success { border-left-color: var(--success); }
.notification-box.info { border-left-color: var(--info); }

.notification-content { display: flex; align-items: center; gap: 10px; }
.notification-content .message p { margin: 0; }

.timer {
  position: absolute;
  left: 0;
  bottom: 0;
  height: 3px;
  width: 100%;
  background: currentColor;
  opacity: 0.3;
}

.timer-animation { animation: timer 5s linear forwards; }

@keyframes timer { from { width: 100%; } to { width: 0; } }

@keyframes open {
  from { transform: translateX(120%); }
  to { transform: translateX(0); }
}

@keyframes close {
  from { transform: translateX(0); }
  to { transform: translateX(120%); }
}
"#;
