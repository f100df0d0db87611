//! The generated application-bootstrap script.
//!
//! Runs as a strict-mode synchronous IIFE appended after the data and module
//! blocks. Initialization order mirrors [`crate::assembler::MODULE_ORDER`]:
//! the engine and molar-mass tables come up before any UI module touches
//! them. The whole sequence sits in one try/catch so a failed init replaces
//! the loading region with a visible error instead of leaving the document
//! half-initialized.

pub(crate) const BOOTSTRAP_JS: &str = r#"'use strict';
(() => {
  const loadingEl = document.getElementById('app-loading');
  const appEl = document.getElementById('app-content');
  try {
    const unitsData = __UNITS_DATA__;
    const periodicData = __PERIODIC_DATA__;
    const constantsData = __CONSTANTS_DATA__;

    Engine.init(unitsData);
    MolarMass.init(periodicData);
    ConverterUI.init();
    MolarUI.init();
    PeriodicUI.init(periodicData);
    ConstantsUI.init(constantsData);
    FavoritesUI.init();
    LibraryUI.init(unitsData);
    BalancerUI.init();

    const unitCount = Object.keys(unitsData.units || {}).length;
    const elCount = periodicData.length;
    const constCount = constantsData.length;
    const badge = document.getElementById('data-badge');
    if (badge) badge.textContent = `${unitCount} units · ${elCount} elements · ${constCount} constants`;

    if (loadingEl) loadingEl.style.display = 'none';
    if (appEl) appEl.style.display = '';

    const switchTab = (target) => {
      document.querySelectorAll('.tab-btn, .mobile-nav-btn').forEach((b) => {
        b.classList.toggle('active', b.dataset.tab === target);
        if (b.tagName === 'BUTTON') b.setAttribute('aria-selected', String(b.dataset.tab === target));
      });
      document.querySelectorAll('.tab-panel').forEach((p) => p.classList.remove('active'));
      const panel = document.getElementById(`tab-${target}`);
      if (panel) panel.classList.add('active');
    };
    document.querySelectorAll('.tab-btn, .mobile-nav-btn').forEach((btn) => {
      btn.addEventListener('click', () => switchTab(btn.dataset.tab));
    });
    window._switchTab = switchTab;
  } catch (err) {
    if (loadingEl) {
      loadingEl.innerHTML = '<div class="startup-error"><div class="startup-error-title">Startup error</div><div class="startup-error-detail"></div></div>';
      const detail = loadingEl.querySelector('.startup-error-detail');
      if (detail) detail.textContent = err.message;
    }
    console.error('[chempack] startup error:', err);
  }
})();
"#;
