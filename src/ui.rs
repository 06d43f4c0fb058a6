//! Browser front end served at `/`.
//!
//! Copy and download run entirely in the page: the clipboard API when the
//! browser exposes it (an alert otherwise), and a Blob link named
//! `figma-export-<unix-ms>.html` for downloads.

pub const INDEX_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Figma to HTML</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
            background: linear-gradient(135deg, #eff6ff, #faf5ff);
            color: #1f2937;
            min-height: 100vh;
            padding: 24px;
        }
        header { text-align: center; margin: 24px 0 32px; }
        header h1 { font-size: 36px; margin-bottom: 8px; }
        header p { color: #4b5563; }
        .grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(360px, 1fr));
            gap: 24px;
            max-width: 1280px;
            margin: 0 auto;
        }
        .panel {
            background: #fff;
            border-radius: 16px;
            box-shadow: 0 10px 30px rgba(0, 0, 0, 0.08);
            padding: 24px;
        }
        label { display: block; font-size: 14px; font-weight: 600; margin: 12px 0 6px; }
        input[type="text"], input[type="password"] {
            width: 100%;
            padding: 10px 12px;
            border: 1px solid #d1d5db;
            border-radius: 10px;
            font-size: 14px;
        }
        .hint { color: #6b7280; font-size: 12px; margin-top: 4px; }
        .actions { display: flex; gap: 8px; margin-top: 16px; }
        button {
            border: none;
            border-radius: 10px;
            padding: 10px 16px;
            font-weight: 600;
            cursor: pointer;
            background: #2563eb;
            color: #fff;
        }
        button.secondary { background: #f3f4f6; color: #374151; }
        button:disabled { opacity: 0.5; cursor: not-allowed; }
        .preview { margin-top: 24px; border: 2px solid #e5e7eb; border-radius: 12px; overflow: hidden; }
        .preview iframe { width: 100%; height: 400px; border: none; display: block; }
        .output-head { display: flex; justify-content: space-between; align-items: center; }
        pre {
            margin-top: 16px;
            background: #111827;
            color: #4ade80;
            border-radius: 12px;
            padding: 16px;
            height: 600px;
            overflow: auto;
            white-space: pre-wrap;
            font-size: 13px;
        }
        .status { margin-top: 12px; font-size: 14px; color: #4b5563; }
        .status.error { color: #b91c1c; }
        [hidden] { display: none !important; }
    </style>
</head>
<body>
    <header>
        <h1>Figma to HTML</h1>
        <p>Paste a Figma file URL and get a standalone HTML document.</p>
    </header>
    <div class="grid">
        <section class="panel">
            <form id="figma-form">
                <label for="figma-url">Figma file URL</label>
                <input id="figma-url" type="text" required
                       placeholder="https://www.figma.com/file/ABC123/Your-Design">
                <p class="hint">Copy the URL from your browser while viewing the file.</p>

                <label for="node-ids">Node ids (optional, export only)</label>
                <input id="node-ids" type="text" placeholder="1:2, 1:3">

                <label for="figma-token">Access token (optional)</label>
                <input id="figma-token" type="password" autocomplete="off"
                       placeholder="Leave empty for an embed page">
                <p class="hint">With a token the design is exported as real HTML elements. The token is sent once and never stored.</p>

                <div class="actions">
                    <button id="generate" type="submit">Generate HTML</button>
                </div>
            </form>
            <p id="status" class="status"></p>
            <div id="preview" class="preview" hidden>
                <iframe id="preview-frame" title="Figma design preview" allowfullscreen></iframe>
            </div>
        </section>
        <section class="panel">
            <div class="output-head">
                <h2>Generated HTML</h2>
                <div class="actions" id="artifact-actions" hidden>
                    <button id="copy" class="secondary" type="button">Copy</button>
                    <button id="download" type="button">Download</button>
                </div>
            </div>
            <pre id="output">HTML will appear here.</pre>
        </section>
    </div>
    <script>
        const form = document.getElementById('figma-form');
        const statusLine = document.getElementById('status');
        const output = document.getElementById('output');
        const actions = document.getElementById('artifact-actions');
        const preview = document.getElementById('preview');
        const previewFrame = document.getElementById('preview-frame');
        const generate = document.getElementById('generate');
        let html = '';

        function setStatus(message, isError) {
            statusLine.textContent = message;
            statusLine.classList.toggle('error', Boolean(isError));
        }

        function showHtml(value) {
            html = value;
            output.textContent = value;
            actions.hidden = !value;
        }

        async function postJson(path, body) {
            const response = await fetch(path, {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body),
            });
            let data = {};
            try {
                data = await response.json();
            } catch (_) {
                data = { error: 'Unexpected response (' + response.status + ')' };
            }
            if (!response.ok) {
                throw new Error(data.error || 'Request failed (' + response.status + ')');
            }
            return data;
        }

        form.addEventListener('submit', async (event) => {
            event.preventDefault();
            const figmaUrl = document.getElementById('figma-url').value.trim();
            const figmaToken = document.getElementById('figma-token').value;
            const nodeIds = document.getElementById('node-ids').value
                .split(',')
                .map((id) => id.trim())
                .filter(Boolean);

            generate.disabled = true;
            setStatus('Generating HTML...');
            try {
                const embed = await postJson('/api/figma', { figmaUrl });
                previewFrame.src = embed.embedUrl;
                preview.hidden = false;

                if (figmaToken) {
                    const body = { fileKey: embed.fileKey, figmaToken };
                    if (nodeIds.length) {
                        body.nodeIds = nodeIds;
                    }
                    const exported = await postJson('/api/figma/export-real', body);
                    showHtml(exported.html);
                } else {
                    showHtml(embed.html);
                }
                setStatus('HTML generated. Copy or download it.');
            } catch (err) {
                showHtml('');
                output.textContent = 'HTML will appear here.';
                setStatus(err.message, true);
            } finally {
                generate.disabled = false;
            }
        });

        document.getElementById('copy').addEventListener('click', async () => {
            if (!html) {
                return;
            }
            if (!navigator.clipboard || !navigator.clipboard.writeText) {
                alert('Clipboard is not available in this browser.');
                return;
            }
            try {
                await navigator.clipboard.writeText(html);
                alert('HTML copied to clipboard!');
            } catch (_) {
                alert('Could not copy to the clipboard.');
            }
        });

        document.getElementById('download').addEventListener('click', () => {
            if (!html || typeof Blob === 'undefined' || !window.URL) {
                return;
            }
            const blob = new Blob([html], { type: 'text/html' });
            const url = URL.createObjectURL(blob);
            const link = document.createElement('a');
            link.href = url;
            link.download = 'figma-export-' + Date.now() + '.html';
            document.body.appendChild(link);
            link.click();
            document.body.removeChild(link);
            URL.revokeObjectURL(url);
        });
    </script>
</body>
</html>
"##;
