//! Default stylesheet for the classes the engine emits

/// CSS covering sentence highlights, line gradients, spacing, media
/// dimming and the reading ruler overlay.
pub const STYLESHEET: &str = r#".fr-sentence { transition: background-color 0.2s ease; }
.fr-sentence strong { font-weight: 700; }

.fr-highlight-0 { background-color: #E8F4FD; }
.fr-highlight-1 { background-color: #FFFACD; padding: 0 2px; display: inline-block; margin-bottom: 2px; }
.fr-highlight-2 { background-color: transparent; }

.fr-beeline-0 { color: #1A237E; }
.fr-beeline-1 { color: #B71C1C; }
.fr-beeline-2 { color: #1B5E20; }

.fr-extra-spacing { letter-spacing: 0.05em; word-spacing: 0.16em; line-height: 1.8; }

.fr-dim { opacity: 0.25; filter: grayscale(80%); transition: opacity 0.2s ease; }
.fr-dim:hover { opacity: 1; filter: none; }

#fr-ruler {
  position: absolute;
  left: 0;
  width: 100%;
  height: 2.2em;
  pointer-events: none;
  background-color: rgba(255, 235, 59, 0.25);
  border-top: 1px solid rgba(0, 0, 0, 0.15);
  border-bottom: 1px solid rgba(0, 0, 0, 0.15);
  z-index: 9999;
}

.hidden { display: none; }
"#;
